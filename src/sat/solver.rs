//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use anyhow::Result;
use cadical::Solver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    timeout: Option<Duration>,
}

/// Result of SAT solving
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub assignment: HashMap<i32, bool>,
    pub solve_time: Duration,
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            timeout: None,
        }
    }

    /// Set solving timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        // CaDiCaL 0.1 exposes no interruption hook; the limit is recorded
        // for reporting only
        self.timeout = Some(timeout);
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("Cannot add empty clause (unsatisfiable)");
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());

        self.clause_count += 1;
        Ok(())
    }

    /// Solve the SAT problem and return the first solution
    ///
    /// `Ok(None)` means unsatisfiable, a normal outcome rather than an
    /// error.
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();

        let result = self.solver.solve();
        let solve_time = start_time.elapsed();

        if result == Some(true) {
            let assignment = self.extract_assignment()?;
            Ok(Some(SolverSolution {
                assignment,
                solve_time,
            }))
        } else {
            Ok(None)
        }
    }

    /// Enumerate up to `max_solutions` solutions
    ///
    /// After each model a blocking clause over `blocking_vars` is added, so
    /// successive models differ on at least one of those variables.
    pub fn solve_multiple(
        &mut self,
        max_solutions: usize,
        blocking_vars: &[i32],
    ) -> Result<Vec<SolverSolution>> {
        let mut solutions = Vec::new();
        let start_time = Instant::now();

        for _ in 0..max_solutions {
            if self.solver.solve() == Some(true) {
                let assignment = self.extract_assignment()?;
                let solution = SolverSolution {
                    assignment: assignment.clone(),
                    solve_time: start_time.elapsed(),
                };
                solutions.push(solution);

                self.add_blocking_clause(&assignment, blocking_vars)?;
            } else {
                break;
            }
        }

        Ok(solutions)
    }

    /// Extract variable assignment from the solver
    fn extract_assignment(&self) -> Result<HashMap<i32, bool>> {
        let mut assignment = HashMap::new();

        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        Ok(assignment)
    }

    /// Add a clause preventing the current assignment of `blocking_vars`
    /// from recurring
    fn add_blocking_clause(
        &mut self,
        assignment: &HashMap<i32, bool>,
        blocking_vars: &[i32],
    ) -> Result<()> {
        let mut blocking_literals = Vec::with_capacity(blocking_vars.len());

        for &var in blocking_vars {
            let value = assignment.get(&var).copied().unwrap_or(false);
            blocking_literals.push(if value { -var } else { var });
        }

        let blocking_clause = Clause::new(blocking_literals);
        self.add_clause(&blocking_clause)?;

        Ok(())
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
        }
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// The configured timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        Ok(())
    }
}
