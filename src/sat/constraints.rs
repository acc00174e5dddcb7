//! Constraint generation for the Battleship puzzle SAT encoding

use super::VariableManager;
use crate::puzzle::{CellState, Orientation, PuzzleSpec};
use anyhow::Result;
use itertools::Itertools;
use std::collections::HashSet;
use thiserror::Error;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }
}

/// Puzzle conditions that make the formula unsatisfiable before any solver
/// call, detected and reported during encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("ship {ship} of length {length} has no candidate placement on a {height}x{width} grid")]
    NoShipCandidates {
        ship: usize,
        length: usize,
        height: usize,
        width: usize,
    },
    #[error("{line} requires {required} ship parts but only spans {available} cells")]
    LineOverCommitted {
        line: String,
        required: usize,
        available: usize,
    },
    #[error("at-least-one constraint over an empty literal set ({context})")]
    EmptyAtLeastOne { context: String },
}

/// A candidate ship placement: origin cell plus orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// Generates SAT constraints for a Battleship puzzle
///
/// Five rule families: fixed cells, placement existence, placement mutual
/// exclusion, footprint with halo water, and row/column counts. All clauses
/// range over the variables interned by the owned [`VariableManager`].
pub struct ConstraintGenerator {
    variables: VariableManager,
    puzzle: PuzzleSpec,
    prune_by_line_counts: bool,
}

impl ConstraintGenerator {
    /// Create a new constraint generator for one puzzle
    pub fn new(puzzle: PuzzleSpec, prune_by_line_counts: bool) -> Self {
        let variables =
            VariableManager::new(puzzle.width(), puzzle.height(), puzzle.ships().len());

        Self {
            variables,
            puzzle,
            prune_by_line_counts,
        }
    }

    /// Generate the full clause set for the puzzle
    pub fn generate_all_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        // 1. Known hits and misses
        clauses.extend(self.generate_fixed_cell_constraints()?);

        // 2. Ship placement existence, exclusion and footprints
        clauses.extend(self.generate_placement_constraints()?);

        // 3. Row and column part counts
        clauses.extend(self.generate_line_count_constraints()?);

        Ok(clauses)
    }

    /// Unit clauses forcing each fixed cell to its known state
    fn generate_fixed_cell_constraints(&mut self) -> Result<Vec<Clause>> {
        let fixed: Vec<((usize, usize), CellState)> = self
            .puzzle
            .fixed_cells()
            .iter()
            .map(|(&cell, &state)| (cell, state))
            .collect();

        let mut clauses = Vec::with_capacity(fixed.len());
        for ((row, col), state) in fixed {
            let cell = self.variables.cell_variable(row, col)?;
            clauses.push(match state {
                CellState::Piece => Clause::unit(cell),
                CellState::Water => Clause::unit(-cell),
            });
        }

        Ok(clauses)
    }

    /// Placement constraints for the whole fleet
    ///
    /// Per ship: exactly one of its candidate placements is true, and a true
    /// placement implies its footprint cells occupied and its halo cells
    /// empty. Distinct ships may not pick the same candidate position;
    /// overlap and touching between differently-placed ships is already
    /// contradictory through the halo clauses.
    fn generate_placement_constraints(&mut self) -> Result<Vec<Clause>> {
        let ship_count = self.puzzle.ships().len();

        let mut all_candidates = Vec::with_capacity(ship_count);
        for ship in 0..ship_count {
            let candidates = self.candidate_placements(ship);
            if candidates.is_empty() {
                return Err(EncodingError::NoShipCandidates {
                    ship,
                    length: self.puzzle.ships()[ship],
                    height: self.puzzle.height(),
                    width: self.puzzle.width(),
                }
                .into());
            }
            all_candidates.push(candidates);
        }

        let mut clauses = Vec::new();

        for (ship, candidates) in all_candidates.iter().enumerate() {
            let mut placement_vars = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                placement_vars.push(self.variables.placement_variable(
                    candidate.row,
                    candidate.col,
                    ship,
                    candidate.orientation,
                )?);
            }

            // Every ship starts somewhere, and only in one place
            clauses.extend(self.exactly_one(&placement_vars, &format!("ship {}", ship))?);

            let length = self.puzzle.ships()[ship];
            for (candidate, &placement) in candidates.iter().zip(&placement_vars) {
                for (row, col) in self.footprint_cells(candidate, length) {
                    let cell = self.variables.cell_variable(row, col)?;
                    clauses.push(Clause::binary(-placement, cell));
                }
                for (row, col) in self.halo_cells(candidate, length) {
                    let cell = self.variables.cell_variable(row, col)?;
                    clauses.push(Clause::binary(-placement, -cell));
                }
            }
        }

        // Distinct ships may not share a starting position. Exclusion only:
        // (-p1 v -p2), never the equivalence pair.
        for i in 0..ship_count {
            let shared: HashSet<Candidate> = all_candidates[i].iter().copied().collect();
            for j in (i + 1)..ship_count {
                for candidate in &all_candidates[j] {
                    if !shared.contains(candidate) {
                        continue;
                    }
                    let p_i = self.variables.placement_variable(
                        candidate.row,
                        candidate.col,
                        i,
                        candidate.orientation,
                    )?;
                    let p_j = self.variables.placement_variable(
                        candidate.row,
                        candidate.col,
                        j,
                        candidate.orientation,
                    )?;
                    clauses.push(Clause::binary(-p_i, -p_j));
                }
            }
        }

        Ok(clauses)
    }

    /// Enumerate the valid candidate placements for one ship
    ///
    /// Out-of-range origins are dropped here, before any clause is emitted,
    /// and a length-1 submarine only keeps the south orientation. With
    /// pruning enabled, candidates whose own line count cannot fit the ship
    /// are dropped as well.
    pub fn candidate_placements(&self, ship: usize) -> Vec<Candidate> {
        let length = self.puzzle.ships()[ship];
        let height = self.puzzle.height();
        let width = self.puzzle.width();
        let mut candidates = Vec::new();

        for row in 0..height {
            for col in 0..width {
                if height - row >= length
                    && (!self.prune_by_line_counts || self.puzzle.columns()[col] >= length)
                {
                    candidates.push(Candidate {
                        row,
                        col,
                        orientation: Orientation::South,
                    });
                }
                if length > 1
                    && width - col >= length
                    && (!self.prune_by_line_counts || self.puzzle.rows()[row] >= length)
                {
                    candidates.push(Candidate {
                        row,
                        col,
                        orientation: Orientation::East,
                    });
                }
            }
        }

        candidates
    }

    /// Cells a candidate placement would occupy
    pub fn footprint_cells(&self, candidate: &Candidate, length: usize) -> Vec<(usize, usize)> {
        (0..length)
            .map(|offset| match candidate.orientation {
                Orientation::East => (candidate.row, candidate.col + offset),
                Orientation::South => (candidate.row + offset, candidate.col),
            })
            .collect()
    }

    /// In-bounds cells adjacent (including diagonally) to the footprint
    pub fn halo_cells(&self, candidate: &Candidate, length: usize) -> Vec<(usize, usize)> {
        let height = self.puzzle.height() as isize;
        let width = self.puzzle.width() as isize;
        let footprint: HashSet<(usize, usize)> =
            self.footprint_cells(candidate, length).into_iter().collect();

        let (row_end, col_end) = match candidate.orientation {
            Orientation::East => (candidate.row, candidate.col + length - 1),
            Orientation::South => (candidate.row + length - 1, candidate.col),
        };

        let mut halo = Vec::new();
        for row in candidate.row as isize - 1..=row_end as isize + 1 {
            for col in candidate.col as isize - 1..=col_end as isize + 1 {
                if row < 0 || row >= height || col < 0 || col >= width {
                    continue;
                }
                let cell = (row as usize, col as usize);
                if !footprint.contains(&cell) {
                    halo.push(cell);
                }
            }
        }

        halo
    }

    /// Row and column count constraints
    fn generate_line_count_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        let height = self.puzzle.height();
        let width = self.puzzle.width();

        let row_counts = self.puzzle.rows().to_vec();
        for (row, required) in row_counts.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(width);
            for col in 0..width {
                cells.push(self.variables.cell_variable(row, col)?);
            }
            clauses.extend(self.line_count_clauses(&cells, required, &format!("row {}", row))?);
        }

        let column_counts = self.puzzle.columns().to_vec();
        for (col, required) in column_counts.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(height);
            for row in 0..height {
                cells.push(self.variables.cell_variable(row, col)?);
            }
            clauses.extend(self.line_count_clauses(&cells, required, &format!("column {}", col))?);
        }

        Ok(clauses)
    }

    /// Pin the number of occupied cells in one line to exactly `required`
    ///
    /// For a positive count: one reified cube per size-n subset, at least
    /// one cube realized, and no more than n occupied cells in total so a
    /// realized cube cannot coexist with extra parts elsewhere in the line.
    fn line_count_clauses(
        &mut self,
        cells: &[i32],
        required: usize,
        line: &str,
    ) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        if required == 0 {
            for &cell in cells {
                clauses.push(Clause::unit(-cell));
            }
            return Ok(clauses);
        }

        if required > cells.len() {
            return Err(EncodingError::LineOverCommitted {
                line: line.to_string(),
                required,
                available: cells.len(),
            }
            .into());
        }

        let mut realized = Vec::new();
        for combination in (0..cells.len()).combinations(required) {
            let cube: Vec<i32> = combination.into_iter().map(|idx| cells[idx]).collect();
            realized.push(self.reify_cube(&cube, &mut clauses));
        }
        clauses.push(self.at_least_one(&realized, line)?);

        clauses.extend(self.at_most_n(cells, required));

        Ok(clauses)
    }

    /// Introduce `aux <=> (l1 ^ l2 ^ ... ^ lk)`
    ///
    /// Both directions are required: `(-aux v li)` for each literal, plus
    /// the long clause `(aux v -l1 v ... v -lk)`.
    pub fn reify_cube(&mut self, cube: &[i32], clauses: &mut Vec<Clause>) -> i32 {
        let aux = self.variables.fresh_aux();

        let mut closure = Vec::with_capacity(cube.len() + 1);
        closure.push(aux);
        closure.extend(cube.iter().map(|&lit| -lit));
        clauses.push(Clause::new(closure));

        for &lit in cube {
            clauses.push(Clause::binary(-aux, lit));
        }

        aux
    }

    /// Introduce `aux <=> (l1 v l2 v ... v lk)`, the dual of [`reify_cube`]
    ///
    /// [`reify_cube`]: ConstraintGenerator::reify_cube
    pub fn reify_clause(&mut self, disjunction: &[i32], clauses: &mut Vec<Clause>) -> i32 {
        let aux = self.variables.fresh_aux();

        let mut closure = Vec::with_capacity(disjunction.len() + 1);
        closure.push(-aux);
        closure.extend(disjunction.iter().copied());
        clauses.push(Clause::new(closure));

        for &lit in disjunction {
            clauses.push(Clause::binary(aux, -lit));
        }

        aux
    }

    /// Single clause requiring at least one literal true
    ///
    /// An empty literal set would be a silently unsatisfiable clause, so it
    /// is surfaced as an [`EncodingError`] instead.
    pub fn at_least_one(&self, literals: &[i32], context: &str) -> Result<Clause, EncodingError> {
        if literals.is_empty() {
            return Err(EncodingError::EmptyAtLeastOne {
                context: context.to_string(),
            });
        }
        Ok(Clause::new(literals.to_vec()))
    }

    /// Pairwise clauses forbidding any two literals both true
    pub fn at_most_one(&self, literals: &[i32]) -> Vec<Clause> {
        let mut clauses = Vec::new();
        for i in 0..literals.len() {
            for j in (i + 1)..literals.len() {
                clauses.push(Clause::binary(-literals[i], -literals[j]));
            }
        }
        clauses
    }

    /// Exactly one literal true
    pub fn exactly_one(&self, literals: &[i32], context: &str) -> Result<Vec<Clause>> {
        let mut clauses = vec![self.at_least_one(literals, context)?];
        clauses.extend(self.at_most_one(literals));
        Ok(clauses)
    }

    /// No more than `bound` literals true: every (bound+1)-subset contains
    /// a false literal
    pub fn at_most_n(&self, literals: &[i32], bound: usize) -> Vec<Clause> {
        (0..literals.len())
            .combinations(bound + 1)
            .map(|combination| {
                Clause::new(combination.into_iter().map(|idx| -literals[idx]).collect())
            })
            .collect()
    }

    /// The puzzle being encoded
    pub fn puzzle(&self) -> &PuzzleSpec {
        &self.puzzle
    }

    /// The variable manager (for external access)
    pub fn variables(&mut self) -> &mut VariableManager {
        &mut self.variables
    }

    /// Get constraint generation statistics
    pub fn statistics(&self) -> ConstraintStatistics {
        ConstraintStatistics {
            height: self.puzzle.height(),
            width: self.puzzle.width(),
            ship_count: self.puzzle.ships().len(),
            total_variables: self.variables.variable_count(),
        }
    }
}

/// Statistics about constraint generation
#[derive(Debug, Clone)]
pub struct ConstraintStatistics {
    pub height: usize,
    pub width: usize,
    pub ship_count: usize,
    pub total_variables: usize,
}

impl std::fmt::Display for ConstraintStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Constraint Generation Statistics:")?;
        writeln!(f, "  Grid size: {}x{}", self.height, self.width)?;
        writeln!(f, "  Ships: {}", self.ship_count)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::PuzzleSpec;
    use std::collections::BTreeMap;

    fn puzzle(
        rows: Vec<usize>,
        columns: Vec<usize>,
        ships: Vec<usize>,
        fixed: &[((usize, usize), CellState)],
    ) -> PuzzleSpec {
        PuzzleSpec::new(rows, columns, ships, fixed.iter().copied().collect()).unwrap()
    }

    #[test]
    fn test_clause_creation() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.literals, vec![1, -2, 3]);
        assert!(!clause.is_empty());
        assert!(!clause.is_unit());

        let unit_clause = Clause::unit(5);
        assert!(unit_clause.is_unit());
        assert_eq!(unit_clause.literals, vec![5]);
    }

    #[test]
    fn test_fixed_cell_constraints() {
        let spec = puzzle(
            vec![1, 0, 1],
            vec![1, 0, 1],
            vec![1, 1],
            &[((0, 0), CellState::Piece), ((2, 2), CellState::Water)],
        );
        let mut cg = ConstraintGenerator::new(spec, true);

        let constraints = cg.generate_fixed_cell_constraints().unwrap();
        assert_eq!(constraints.len(), 2);

        let piece_var = cg.variables().cell_variable(0, 0).unwrap();
        let water_var = cg.variables().cell_variable(2, 2).unwrap();
        assert!(constraints.iter().any(|c| c.literals == vec![piece_var]));
        assert!(constraints.iter().any(|c| c.literals == vec![-water_var]));
    }

    #[test]
    fn test_candidate_enumeration() {
        let spec = puzzle(vec![2, 2, 2], vec![2, 2, 2], vec![2], &[]);
        let cg = ConstraintGenerator::new(spec, false);

        let candidates = cg.candidate_placements(0);
        // South fits in rows 0..2, east in columns 0..2: 6 + 6 candidates
        assert_eq!(candidates.len(), 12);
        assert!(candidates.contains(&Candidate {
            row: 1,
            col: 2,
            orientation: Orientation::South
        }));
        assert!(!candidates.contains(&Candidate {
            row: 2,
            col: 0,
            orientation: Orientation::South
        }));
        assert!(!candidates.contains(&Candidate {
            row: 0,
            col: 2,
            orientation: Orientation::East
        }));
    }

    #[test]
    fn test_submarine_has_no_east_candidates() {
        let spec = puzzle(vec![1, 0, 1], vec![1, 0, 1], vec![1], &[]);
        let cg = ConstraintGenerator::new(spec, false);

        let candidates = cg.candidate_placements(0);
        assert_eq!(candidates.len(), 9);
        assert!(candidates
            .iter()
            .all(|c| c.orientation == Orientation::South));
    }

    #[test]
    fn test_candidate_pruning_by_line_counts() {
        let spec = puzzle(vec![1, 0, 1], vec![1, 0, 1], vec![1], &[]);
        let cg = ConstraintGenerator::new(spec, true);

        // Column 1 and row 1 cannot hold any part, so their cells are
        // dropped from the candidate set
        let candidates = cg.candidate_placements(0);
        assert_eq!(candidates.len(), 6);
        assert!(candidates.iter().all(|c| c.col != 1));
    }

    #[test]
    fn test_single_candidate_on_strip() {
        let spec = puzzle(vec![3], vec![1, 1, 1], vec![3], &[]);
        let cg = ConstraintGenerator::new(spec, false);

        let candidates = cg.candidate_placements(0);
        assert_eq!(
            candidates,
            vec![Candidate {
                row: 0,
                col: 0,
                orientation: Orientation::East
            }]
        );
    }

    #[test]
    fn test_oversized_ship_is_encoding_error() {
        let spec = puzzle(vec![1, 1, 1], vec![1, 1, 1], vec![4], &[]);
        let mut cg = ConstraintGenerator::new(spec, false);

        let err = cg.generate_all_constraints().unwrap_err();
        match err.downcast_ref::<EncodingError>() {
            Some(EncodingError::NoShipCandidates { ship: 0, length: 4, .. }) => {}
            other => panic!("expected NoShipCandidates, got {:?}", other),
        }
    }

    #[test]
    fn test_footprint_and_halo_geometry() {
        let spec = puzzle(vec![2, 2, 2], vec![2, 2, 2], vec![2], &[]);
        let cg = ConstraintGenerator::new(spec, false);

        let candidate = Candidate {
            row: 1,
            col: 1,
            orientation: Orientation::East,
        };
        assert_eq!(cg.footprint_cells(&candidate, 2), vec![(1, 1), (1, 2)]);

        let halo = cg.halo_cells(&candidate, 2);
        // 3x4 bounding box clipped to the 3x3 grid minus the footprint
        assert_eq!(halo.len(), 7);
        assert!(halo.contains(&(0, 0)));
        assert!(halo.contains(&(2, 2)));
        assert!(!halo.contains(&(1, 1)));
        assert!(!halo.contains(&(1, 2)));

        let corner = Candidate {
            row: 0,
            col: 0,
            orientation: Orientation::South,
        };
        assert_eq!(cg.footprint_cells(&corner, 2), vec![(0, 0), (1, 0)]);
        let corner_halo = cg.halo_cells(&corner, 2);
        assert_eq!(corner_halo.len(), 4); // (0,1), (1,1), (2,0), (2,1)
    }

    #[test]
    fn test_reify_cube_clause_shape() {
        let spec = puzzle(vec![1], vec![1], vec![], &[]);
        let mut cg = ConstraintGenerator::new(spec, false);

        let mut clauses = Vec::new();
        let aux = cg.reify_cube(&[3, 5, 7], &mut clauses);

        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[0].literals, vec![aux, -3, -5, -7]);
        assert!(clauses.contains(&Clause::binary(-aux, 3)));
        assert!(clauses.contains(&Clause::binary(-aux, 5)));
        assert!(clauses.contains(&Clause::binary(-aux, 7)));
    }

    #[test]
    fn test_reify_clause_clause_shape() {
        let spec = puzzle(vec![1], vec![1], vec![], &[]);
        let mut cg = ConstraintGenerator::new(spec, false);

        let mut clauses = Vec::new();
        let aux = cg.reify_clause(&[3, 5], &mut clauses);

        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].literals, vec![-aux, 3, 5]);
        assert!(clauses.contains(&Clause::binary(aux, -3)));
        assert!(clauses.contains(&Clause::binary(aux, -5)));
    }

    #[test]
    fn test_at_most_one_is_pairwise_exclusion() {
        let spec = puzzle(vec![1], vec![1], vec![], &[]);
        let cg = ConstraintGenerator::new(spec, false);

        let clauses = cg.at_most_one(&[1, 2, 3, 4]);
        assert_eq!(clauses.len(), 6); // C(4, 2)
        for clause in &clauses {
            // Exclusion only: both literals negative, never a mixed pair
            assert_eq!(clause.literals.len(), 2);
            assert!(clause.literals.iter().all(|&lit| lit < 0));
        }
    }

    #[test]
    fn test_at_least_one_rejects_empty_set() {
        let spec = puzzle(vec![1], vec![1], vec![], &[]);
        let cg = ConstraintGenerator::new(spec, false);

        let err = cg.at_least_one(&[], "nothing").unwrap_err();
        assert!(matches!(err, EncodingError::EmptyAtLeastOne { .. }));

        let clause = cg.at_least_one(&[1, -2], "something").unwrap();
        assert_eq!(clause.literals, vec![1, -2]);
    }

    #[test]
    fn test_at_most_n_counts() {
        let spec = puzzle(vec![1], vec![1], vec![], &[]);
        let cg = ConstraintGenerator::new(spec, false);

        let clauses = cg.at_most_n(&[1, 2, 3, 4], 2);
        assert_eq!(clauses.len(), 4); // C(4, 3)
        assert!(clauses
            .iter()
            .all(|clause| clause.literals.iter().all(|&lit| lit < 0)));

        // A bound the set cannot exceed produces no clauses
        assert!(cg.at_most_n(&[1, 2], 2).is_empty());
    }

    #[test]
    fn test_zero_count_line_forces_water() {
        let spec = puzzle(vec![0], vec![0, 0, 0], vec![], &[]);
        let mut cg = ConstraintGenerator::new(spec, false);

        let clauses = cg.generate_all_constraints().unwrap();
        // Row 0 plus each column force the same three cells empty
        assert_eq!(clauses.len(), 6);
        assert!(clauses.iter().all(|c| c.is_unit() && c.literals[0] < 0));
    }

    #[test]
    fn test_overcommitted_line_is_encoding_error() {
        let spec = puzzle(vec![4], vec![1, 1, 1], vec![], &[]);
        let mut cg = ConstraintGenerator::new(spec, false);

        let err = cg.generate_all_constraints().unwrap_err();
        match err.downcast_ref::<EncodingError>() {
            Some(EncodingError::LineOverCommitted { required: 4, available: 3, .. }) => {}
            other => panic!("expected LineOverCommitted, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_start_exclusion_between_ships() {
        let spec = puzzle(vec![1, 0, 1], vec![1, 0, 1], vec![1, 1], &[]);
        let mut cg = ConstraintGenerator::new(spec, false);

        let clauses = cg.generate_placement_constraints().unwrap();

        let p0 = cg
            .variables()
            .placement_variable(0, 0, 0, Orientation::South)
            .unwrap();
        let p1 = cg
            .variables()
            .placement_variable(0, 0, 1, Orientation::South)
            .unwrap();

        assert!(clauses.contains(&Clause::binary(-p0, -p1)));
        // Never the equivalence pair
        assert!(!clauses.contains(&Clause::binary(p0, -p1)));
        assert!(!clauses.contains(&Clause::binary(-p0, p1)));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let fixed = [((0, 2), CellState::Water), ((2, 0), CellState::Piece)];
        let spec = puzzle(vec![1, 0, 1], vec![1, 0, 1], vec![1, 1], &fixed);

        let mut first = ConstraintGenerator::new(spec.clone(), true);
        let mut second = ConstraintGenerator::new(spec, true);

        assert_eq!(
            first.generate_all_constraints().unwrap(),
            second.generate_all_constraints().unwrap()
        );
    }

    #[test]
    fn test_reified_cube_is_equivalence() {
        use super::super::solver::SatSolver;

        let spec = puzzle(vec![1], vec![1], vec![], &[]);
        let mut cg = ConstraintGenerator::new(spec, false);

        // All cube literals true forces aux true
        let mut clauses = Vec::new();
        let aux = cg.reify_cube(&[2, 3], &mut clauses);
        assert!(aux != 2 && aux != 3);
        let mut solver = SatSolver::new();
        solver.add_clauses(&clauses).unwrap();
        solver.add_clause(&Clause::unit(2)).unwrap();
        solver.add_clause(&Clause::unit(3)).unwrap();
        let solution = solver.solve().unwrap().expect("satisfiable");
        assert_eq!(solution.assignment.get(&aux), Some(&true));

        // Aux true forces every cube literal true
        let mut solver = SatSolver::new();
        solver.add_clauses(&clauses).unwrap();
        solver.add_clause(&Clause::unit(aux)).unwrap();
        let solution = solver.solve().unwrap().expect("satisfiable");
        assert_eq!(solution.assignment.get(&2), Some(&true));
        assert_eq!(solution.assignment.get(&3), Some(&true));

        // Aux false with a cube literal false stays satisfiable
        let mut solver = SatSolver::new();
        solver.add_clauses(&clauses).unwrap();
        solver.add_clause(&Clause::unit(-aux)).unwrap();
        solver.add_clause(&Clause::unit(-2)).unwrap();
        assert!(solver.solve().unwrap().is_some());
    }
}
