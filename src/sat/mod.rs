//! SAT encoding and solving for Battleship puzzles

pub mod variables;
pub mod constraints;
pub mod encoder;
pub mod solver;

pub use variables::VariableManager;
pub use constraints::{Clause, ConstraintGenerator, EncodingError};
pub use encoder::{DecodedSolution, PuzzleEncoder};
pub use solver::{SatSolver, SolverSolution};
