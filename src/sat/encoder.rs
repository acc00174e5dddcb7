//! SAT encoder and model decoder for Battleship puzzles

use super::constraints::Clause;
use super::{ConstraintGenerator, SatSolver, SolverSolution};
use crate::config::Settings;
use crate::puzzle::{Grid, PuzzleSpec, ShipPlacement};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::time::Duration;

/// A decoded satisfying model: the occupancy grid plus the placement of
/// every ship
#[derive(Debug, Clone)]
pub struct DecodedSolution {
    pub grid: Grid,
    pub placements: Vec<ShipPlacement>,
    pub solve_time: Duration,
}

/// Assembles the CNF formula for one puzzle, runs the solver and decodes
/// the resulting models
pub struct PuzzleEncoder {
    settings: Settings,
    generator: ConstraintGenerator,
    solver: SatSolver,
    height: usize,
    width: usize,
}

impl PuzzleEncoder {
    /// Create a new encoder for the given puzzle
    pub fn new(settings: Settings, puzzle: &PuzzleSpec) -> Self {
        let generator =
            ConstraintGenerator::new(puzzle.clone(), settings.encoding.prune_by_line_counts);

        let mut solver = SatSolver::new();
        solver.set_timeout(Duration::from_secs(settings.solver.timeout_seconds));

        Self {
            settings,
            generator,
            solver,
            height: puzzle.height(),
            width: puzzle.width(),
        }
    }

    /// Generate the full clause set without solving
    pub fn encode(&mut self) -> Result<Vec<Clause>> {
        self.generator
            .generate_all_constraints()
            .context("Failed to generate SAT constraints")
    }

    /// Encode the puzzle, enumerate models and decode each into a solution
    ///
    /// Blocking clauses range over the cell variables, so every returned
    /// solution is a distinct grid even when ships of equal length could be
    /// reindexed.
    pub fn solve(&mut self) -> Result<Vec<DecodedSolution>> {
        let clauses = self.encode()?;

        self.solver
            .add_clauses(&clauses)
            .context("Failed to add clauses to SAT solver")?;

        let cell_vars = self.generator.variables().all_cell_variables()?;
        let solutions = self
            .solver
            .solve_multiple(self.settings.solver.max_solutions, &cell_vars)
            .context("SAT solving failed")?;

        let mut decoded = Vec::with_capacity(solutions.len());
        for solution in &solutions {
            decoded.push(self.decode(solution)?);
        }

        Ok(decoded)
    }

    /// Decode one satisfying model
    pub fn decode(&mut self, solution: &SolverSolution) -> Result<DecodedSolution> {
        let grid = self.decode_grid(&solution.assignment)?;
        let placements = self.decode_placements(&solution.assignment)?;

        Ok(DecodedSolution {
            grid,
            placements,
            solve_time: solution.solve_time,
        })
    }

    /// Read the cell variables of a model into an occupancy grid
    fn decode_grid(&mut self, assignment: &HashMap<i32, bool>) -> Result<Grid> {
        let mut grid = Grid::new(self.width, self.height);

        for row in 0..self.height {
            for col in 0..self.width {
                let cell_var = self.generator.variables().cell_variable(row, col)?;
                let occupied = assignment.get(&cell_var).copied().unwrap_or(false);
                if occupied {
                    grid.set(row, col, true)?;
                }
            }
        }

        Ok(grid)
    }

    /// Read the true placement variable of each ship out of a model
    ///
    /// Fails loudly on internal inconsistencies: a true placement whose
    /// footprint cells are not all occupied, or a ship without exactly one
    /// true placement. Either indicates an encoding bug, not bad input.
    fn decode_placements(&mut self, assignment: &HashMap<i32, bool>) -> Result<Vec<ShipPlacement>> {
        let ship_lengths = self.generator.puzzle().ships().to_vec();
        let mut placements = Vec::with_capacity(ship_lengths.len());

        for (ship, &length) in ship_lengths.iter().enumerate() {
            let candidates = self.generator.candidate_placements(ship);
            let mut decoded_for_ship = Vec::new();

            for candidate in &candidates {
                let placement_var = self.generator.variables().placement_variable(
                    candidate.row,
                    candidate.col,
                    ship,
                    candidate.orientation,
                )?;
                if !assignment.get(&placement_var).copied().unwrap_or(false) {
                    continue;
                }

                for (row, col) in self.generator.footprint_cells(candidate, length) {
                    let cell_var = self.generator.variables().cell_variable(row, col)?;
                    if !assignment.get(&cell_var).copied().unwrap_or(false) {
                        anyhow::bail!(
                            "Encoding bug: placement of ship {} at ({}, {}) {:?} is true \
                             but footprint cell ({}, {}) is empty in the model",
                            ship,
                            candidate.row,
                            candidate.col,
                            candidate.orientation,
                            row,
                            col
                        );
                    }
                }

                decoded_for_ship.push(ShipPlacement {
                    row: candidate.row,
                    col: candidate.col,
                    ship,
                    orientation: candidate.orientation,
                    length,
                });
            }

            if decoded_for_ship.len() != 1 {
                anyhow::bail!(
                    "Encoding bug: ship {} decodes to {} placements, expected exactly one",
                    ship,
                    decoded_for_ship.len()
                );
            }
            placements.push(decoded_for_ship.remove(0));
        }

        Ok(placements)
    }

    /// Get encoding statistics
    pub fn statistics(&self) -> EncodingStatistics {
        let constraint_stats = self.generator.statistics();
        let solver_stats = self.solver.statistics();

        EncodingStatistics {
            height: self.height,
            width: self.width,
            ship_count: constraint_stats.ship_count,
            total_variables: constraint_stats.total_variables,
            total_clauses: solver_stats.clause_count,
        }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub height: usize,
    pub width: usize,
    pub ship_count: usize,
    pub total_variables: usize,
    pub total_clauses: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.height, self.width)?;
        writeln!(f, "  Ships: {}", self.ship_count)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        Ok(())
    }
}
