//! Puzzle domain types and file formats

pub mod spec;
pub mod grid;
pub mod io;

pub use spec::{CellState, Orientation, PuzzleSpec, ShipPlacement};
pub use grid::Grid;
pub use io::{create_example_puzzles, load_grid_from_file, load_puzzle_from_file, save_grid_to_file};
