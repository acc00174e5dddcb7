//! Battleship problem definition and solution handling

pub mod problem;
pub mod solution;
pub mod checker;

pub use problem::PuzzleProblem;
pub use solution::Solution;
pub use checker::{CheckResult, SolutionChecker};
