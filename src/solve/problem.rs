//! Battleship puzzle problem definition

use super::{Solution, SolutionChecker};
use crate::config::Settings;
use crate::puzzle::{load_puzzle_from_file, PuzzleSpec};
use crate::sat::PuzzleEncoder;
use anyhow::{Context, Result};
use std::time::Instant;

/// Represents one Battleship puzzle to be solved
pub struct PuzzleProblem {
    settings: Settings,
    puzzle: PuzzleSpec,
    encoder: PuzzleEncoder,
    checker: SolutionChecker,
}

impl PuzzleProblem {
    /// Create a new problem from settings
    pub fn new(settings: Settings) -> Result<Self> {
        let puzzle = load_puzzle_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;

        let encoder = PuzzleEncoder::new(settings.clone(), &puzzle);
        let checker = SolutionChecker::new(puzzle.clone());

        Ok(Self {
            settings,
            puzzle,
            encoder,
            checker,
        })
    }

    /// Create a problem with an explicit puzzle (useful for testing)
    pub fn with_puzzle(settings: Settings, puzzle: PuzzleSpec) -> Result<Self> {
        let encoder = PuzzleEncoder::new(settings.clone(), &puzzle);
        let checker = SolutionChecker::new(puzzle.clone());

        Ok(Self {
            settings,
            puzzle,
            encoder,
            checker,
        })
    }

    /// Solve the puzzle and return all verified solutions
    pub fn solve(&mut self) -> Result<Vec<Solution>> {
        let start_time = Instant::now();

        println!("Solving Battleship puzzle...");
        println!(
            "Grid: {}x{}, fleet of {} ships, {} fixed cells",
            self.puzzle.height(),
            self.puzzle.width(),
            self.puzzle.ships().len(),
            self.puzzle.fixed_cells().len()
        );

        let decoded = self.encoder.solve().context("SAT solving failed")?;
        let solve_time = start_time.elapsed();

        if decoded.is_empty() {
            println!("No solutions found!");
            return Ok(Vec::new());
        }

        println!(
            "Found {} candidate solutions in {:.3}s",
            decoded.len(),
            solve_time.as_secs_f64()
        );

        // Verify each decoded model against the puzzle rules
        let mut solutions = Vec::new();
        for (i, candidate) in decoded.into_iter().enumerate() {
            match self.checker.check(&candidate.grid, &candidate.placements) {
                Ok(check_result) => {
                    if check_result.is_valid {
                        solutions.push(Solution::new(
                            candidate.grid,
                            candidate.placements,
                            candidate.solve_time,
                        ));
                    } else {
                        eprintln!(
                            "Solution {} failed verification: {}",
                            i + 1,
                            check_result.violations.join("; ")
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error verifying solution {}: {}", i + 1, e);
                }
            }
        }

        println!("Found {} valid solutions", solutions.len());
        Ok(solutions)
    }

    /// Get the puzzle being solved
    pub fn puzzle(&self) -> &PuzzleSpec {
        &self.puzzle
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get encoding statistics
    pub fn encoding_statistics(&self) -> crate::sat::encoder::EncodingStatistics {
        self.encoder.statistics()
    }
}
