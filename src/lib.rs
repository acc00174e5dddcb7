//! Battleship Puzzle SAT Solver
//!
//! This library solves Battleship logic puzzles by encoding the placement
//! rules as a CNF formula and enumerating models with a SAT solver.

pub mod config;
pub mod puzzle;
pub mod sat;
pub mod solve;
pub mod utils;

pub use config::Settings;
pub use solve::{PuzzleProblem, Solution};

use anyhow::Result;

/// Main entry point for solving Battleship puzzles
pub fn solve_puzzle(settings: Settings) -> Result<Vec<Solution>> {
    let mut problem = PuzzleProblem::new(settings)?;
    problem.solve()
}
