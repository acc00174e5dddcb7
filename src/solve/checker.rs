//! Independent verification of solved Battleship grids

use crate::puzzle::{CellState, Grid, PuzzleSpec, ShipPlacement};
use anyhow::Result;
use std::collections::HashSet;

/// Checks candidate solutions against the puzzle rules without consulting
/// the SAT encoding
pub struct SolutionChecker {
    puzzle: PuzzleSpec,
}

/// Result of checking a candidate solution
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub is_valid: bool,
    pub violations: Vec<String>,
    pub details: CheckDetails,
}

/// Which rule groups passed
#[derive(Debug, Clone, Default)]
pub struct CheckDetails {
    pub line_counts_ok: bool,
    pub fixed_cells_ok: bool,
    pub fleet_ok: bool,
    pub separation_ok: bool,
}

impl SolutionChecker {
    /// Create a new checker for the given puzzle
    pub fn new(puzzle: PuzzleSpec) -> Self {
        Self { puzzle }
    }

    /// Check a grid together with its claimed fleet layout
    pub fn check(&self, grid: &Grid, placements: &[ShipPlacement]) -> Result<CheckResult> {
        let mut result = self.check_grid(grid)?;

        // The placements must cover exactly the occupied cells
        let mut claimed = HashSet::new();
        for placement in placements {
            if !placement.in_bounds(self.puzzle.height(), self.puzzle.width()) {
                result.violations.push(format!(
                    "Ship {} extends past the grid from ({}, {})",
                    placement.ship, placement.row, placement.col
                ));
            }
            for cell in placement.cells() {
                if !claimed.insert(cell) {
                    result.violations.push(format!(
                        "Ships overlap at ({}, {})",
                        cell.0, cell.1
                    ));
                }
            }
        }

        let occupied: HashSet<(usize, usize)> = grid.occupied_cells().into_iter().collect();
        if claimed != occupied {
            result
                .violations
                .push("Fleet layout does not match the occupied cells".to_string());
        }

        let mut claimed_lengths: Vec<usize> = placements.iter().map(|p| p.length).collect();
        claimed_lengths.sort_unstable();
        let mut expected_lengths = self.puzzle.ships().to_vec();
        expected_lengths.sort_unstable();
        if claimed_lengths != expected_lengths {
            result.violations.push(format!(
                "Fleet lengths {:?} do not match the puzzle fleet {:?}",
                claimed_lengths, expected_lengths
            ));
        }

        result.is_valid = result.violations.is_empty();
        Ok(result)
    }

    /// Check a grid on its own: line counts, fixed cells, and that the
    /// occupied cells form the puzzle's fleet of separated straight ships
    pub fn check_grid(&self, grid: &Grid) -> Result<CheckResult> {
        let mut violations = Vec::new();

        if grid.height != self.puzzle.height() || grid.width != self.puzzle.width() {
            violations.push(format!(
                "Grid is {}x{} but the puzzle is {}x{}",
                grid.height,
                grid.width,
                self.puzzle.height(),
                self.puzzle.width()
            ));
            return Ok(CheckResult {
                is_valid: false,
                violations,
                details: CheckDetails::default(),
            });
        }

        let line_counts_ok = self.check_line_counts(grid, &mut violations);
        let fixed_cells_ok = self.check_fixed_cells(grid, &mut violations);
        let (fleet_ok, separation_ok) = self.check_fleet(grid, &mut violations);

        Ok(CheckResult {
            is_valid: violations.is_empty(),
            violations,
            details: CheckDetails {
                line_counts_ok,
                fixed_cells_ok,
                fleet_ok,
                separation_ok,
            },
        })
    }

    fn check_line_counts(&self, grid: &Grid, violations: &mut Vec<String>) -> bool {
        let mut ok = true;

        for (row, &required) in self.puzzle.rows().iter().enumerate() {
            let actual = grid.row_count(row);
            if actual != required {
                violations.push(format!(
                    "Row {} has {} ship parts, expected {}",
                    row, actual, required
                ));
                ok = false;
            }
        }

        for (col, &required) in self.puzzle.columns().iter().enumerate() {
            let actual = grid.column_count(col);
            if actual != required {
                violations.push(format!(
                    "Column {} has {} ship parts, expected {}",
                    col, actual, required
                ));
                ok = false;
            }
        }

        ok
    }

    fn check_fixed_cells(&self, grid: &Grid, violations: &mut Vec<String>) -> bool {
        let mut ok = true;

        for (&(row, col), &state) in self.puzzle.fixed_cells() {
            let occupied = grid.get(row, col);
            let expected = state == CellState::Piece;
            if occupied != expected {
                violations.push(format!(
                    "Cell ({}, {}) is fixed to {:?} but the grid disagrees",
                    row, col, state
                ));
                ok = false;
            }
        }

        ok
    }

    /// Group the occupied cells into components under 8-connectivity.
    ///
    /// Diagonally touching ships merge into one component, so requiring
    /// every component to be a straight run enforces both ship shape and
    /// the separation rule; the length multiset then pins the fleet.
    fn check_fleet(&self, grid: &Grid, violations: &mut Vec<String>) -> (bool, bool) {
        let mut fleet_ok = true;
        let mut separation_ok = true;

        let occupied: HashSet<(usize, usize)> = grid.occupied_cells().into_iter().collect();
        let mut visited: HashSet<(usize, usize)> = HashSet::new();
        let mut segment_lengths = Vec::new();

        for &start in grid.occupied_cells().iter() {
            if visited.contains(&start) {
                continue;
            }

            let component = Self::flood_fill(start, &occupied);
            visited.extend(component.iter().copied());

            if Self::is_straight_run(&component) {
                segment_lengths.push(component.len());
            } else {
                violations.push(format!(
                    "Ship parts around ({}, {}) do not form a separated straight ship",
                    start.0, start.1
                ));
                separation_ok = false;
            }
        }

        segment_lengths.sort_unstable();
        let mut expected = self.puzzle.ships().to_vec();
        expected.sort_unstable();

        if separation_ok && segment_lengths != expected {
            violations.push(format!(
                "Grid contains ships of lengths {:?}, expected {:?}",
                segment_lengths, expected
            ));
            fleet_ok = false;
        }

        (fleet_ok && separation_ok, separation_ok)
    }

    fn flood_fill(
        start: (usize, usize),
        occupied: &HashSet<(usize, usize)>,
    ) -> Vec<(usize, usize)> {
        let mut component = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        seen.insert(start);

        while let Some((row, col)) = stack.pop() {
            component.push((row, col));

            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = row as i64 + dr;
                    let nc = col as i64 + dc;
                    if nr < 0 || nc < 0 {
                        continue;
                    }
                    let neighbor = (nr as usize, nc as usize);
                    if occupied.contains(&neighbor) && seen.insert(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }

        component
    }

    /// A component is a valid ship if it occupies consecutive cells of a
    /// single row or a single column
    fn is_straight_run(component: &[(usize, usize)]) -> bool {
        if component.len() == 1 {
            return true;
        }

        let rows: HashSet<usize> = component.iter().map(|&(r, _)| r).collect();
        let cols: HashSet<usize> = component.iter().map(|&(_, c)| c).collect();

        if rows.len() == 1 {
            let mut sorted: Vec<usize> = component.iter().map(|&(_, c)| c).collect();
            sorted.sort_unstable();
            sorted.windows(2).all(|w| w[1] == w[0] + 1)
        } else if cols.len() == 1 {
            let mut sorted: Vec<usize> = component.iter().map(|&(r, _)| r).collect();
            sorted.sort_unstable();
            sorted.windows(2).all(|w| w[1] == w[0] + 1)
        } else {
            false
        }
    }
}
