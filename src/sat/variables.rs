//! Variable management for the puzzle SAT encoding

use crate::puzzle::Orientation;
use anyhow::Result;
use std::collections::HashMap;

/// Types of named variables used in the SAT encoding
///
/// Auxiliary reification variables are minted from the same counter but are
/// anonymous and never appear in this map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Cell at (row, col) holds a ship part
    Cell { row: usize, col: usize },
    /// Ship `ship` starts at (row, col) extending in `orientation`
    Placement {
        row: usize,
        col: usize,
        ship: usize,
        orientation: Orientation,
    },
}

/// Interns named variables and mints fresh auxiliary ones
///
/// Identical (kind, parameters) tuples always map to the same positive id,
/// so clauses referring to the same logical fact share a variable. The
/// monotonic `next_id` counter is owned here, which guarantees auxiliary
/// variables never collide with interned ones.
#[derive(Debug)]
pub struct VariableManager {
    /// Map from variable type to SAT variable ID (positive integer)
    variable_map: HashMap<VariableType, i32>,
    /// Next available variable ID
    next_id: i32,
    /// Number of anonymous auxiliary variables minted so far
    aux_count: usize,
    /// Grid dimensions
    width: usize,
    height: usize,
    /// Number of ships in the fleet
    ship_count: usize,
}

impl VariableManager {
    /// Create a new variable manager for a height x width grid
    pub fn new(width: usize, height: usize, ship_count: usize) -> Self {
        Self {
            variable_map: HashMap::new(),
            next_id: 1, // SAT variables start from 1
            aux_count: 0,
            width,
            height,
            ship_count,
        }
    }

    /// Get or create a variable ID for the given variable type
    pub fn get_variable(&mut self, var_type: VariableType) -> Result<i32> {
        if let Some(&id) = self.variable_map.get(&var_type) {
            return Ok(id);
        }

        self.validate_variable(&var_type)?;

        let id = self.next_id;
        self.next_id += 1;
        self.variable_map.insert(var_type, id);
        Ok(id)
    }

    /// Variable for cell occupancy at (row, col)
    pub fn cell_variable(&mut self, row: usize, col: usize) -> Result<i32> {
        self.get_variable(VariableType::Cell { row, col })
    }

    /// Variable for a candidate ship placement
    pub fn placement_variable(
        &mut self,
        row: usize,
        col: usize,
        ship: usize,
        orientation: Orientation,
    ) -> Result<i32> {
        self.get_variable(VariableType::Placement {
            row,
            col,
            ship,
            orientation,
        })
    }

    /// Mint a fresh anonymous auxiliary variable
    pub fn fresh_aux(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        self.aux_count += 1;
        id
    }

    /// All cell variables in row-major order
    pub fn all_cell_variables(&mut self) -> Result<Vec<i32>> {
        let mut variables = Vec::with_capacity(self.width * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                variables.push(self.cell_variable(row, col)?);
            }
        }
        Ok(variables)
    }

    /// Total number of variables created (interned + auxiliary)
    pub fn variable_count(&self) -> usize {
        (self.next_id - 1) as usize
    }

    /// Grid dimensions as (height, width)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Validate that a variable type is within bounds
    fn validate_variable(&self, var_type: &VariableType) -> Result<()> {
        match var_type {
            VariableType::Cell { row, col } => {
                if *row >= self.height {
                    anyhow::bail!("Cell row {} out of bounds (height: {})", row, self.height);
                }
                if *col >= self.width {
                    anyhow::bail!("Cell column {} out of bounds (width: {})", col, self.width);
                }
            }
            VariableType::Placement { row, col, ship, .. } => {
                if *row >= self.height || *col >= self.width {
                    anyhow::bail!(
                        "Placement origin ({}, {}) out of bounds for {}x{} grid",
                        row,
                        col,
                        self.height,
                        self.width
                    );
                }
                if *ship >= self.ship_count {
                    anyhow::bail!(
                        "Ship index {} out of bounds (fleet size: {})",
                        ship,
                        self.ship_count
                    );
                }
            }
        }
        Ok(())
    }

    /// Get statistics about variable usage
    pub fn statistics(&self) -> VariableStatistics {
        let mut cell_vars = 0;
        let mut placement_vars = 0;

        for var_type in self.variable_map.keys() {
            match var_type {
                VariableType::Cell { .. } => cell_vars += 1,
                VariableType::Placement { .. } => placement_vars += 1,
            }
        }

        VariableStatistics {
            total_variables: self.variable_count(),
            cell_variables: cell_vars,
            placement_variables: placement_vars,
            auxiliary_variables: self.aux_count,
        }
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub cell_variables: usize,
    pub placement_variables: usize,
    pub auxiliary_variables: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Cell variables: {}", self.cell_variables)?;
        writeln!(f, "  Placement variables: {}", self.placement_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.auxiliary_variables)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_interning() {
        let mut vm = VariableManager::new(3, 3, 2);

        let var1 = vm.cell_variable(0, 0).unwrap();
        let var2 = vm.cell_variable(1, 1).unwrap();
        assert_eq!(var1, 1);
        assert_eq!(var2, 2);

        // Same parameters always yield the same id
        assert_eq!(vm.cell_variable(0, 0).unwrap(), var1);
        assert_eq!(vm.variable_count(), 2);
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let mut vm = VariableManager::new(3, 3, 2);

        let cell = vm.cell_variable(1, 2).unwrap();
        let east = vm.placement_variable(1, 2, 0, Orientation::East).unwrap();
        let south = vm.placement_variable(1, 2, 0, Orientation::South).unwrap();
        let other_ship = vm.placement_variable(1, 2, 1, Orientation::East).unwrap();

        let mut ids = vec![cell, east, south, other_ship];
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        assert_eq!(
            vm.placement_variable(1, 2, 0, Orientation::East).unwrap(),
            east
        );
    }

    #[test]
    fn test_fresh_aux_never_collides() {
        let mut vm = VariableManager::new(2, 2, 1);

        let cell = vm.cell_variable(0, 0).unwrap();
        let aux1 = vm.fresh_aux();
        let aux2 = vm.fresh_aux();
        let later_cell = vm.cell_variable(1, 1).unwrap();

        let mut ids = vec![cell, aux1, aux2, later_cell];
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert_eq!(vm.variable_count(), 4);
    }

    #[test]
    fn test_variable_bounds() {
        let mut vm = VariableManager::new(2, 2, 1);

        assert!(vm.cell_variable(1, 1).is_ok());
        assert!(vm.cell_variable(2, 0).is_err());
        assert!(vm.cell_variable(0, 2).is_err());

        assert!(vm.placement_variable(0, 0, 0, Orientation::East).is_ok());
        assert!(vm.placement_variable(2, 0, 0, Orientation::East).is_err());
        assert!(vm.placement_variable(0, 0, 1, Orientation::South).is_err());
    }

    #[test]
    fn test_all_cell_variables() {
        let mut vm = VariableManager::new(2, 2, 0);

        let vars = vm.all_cell_variables().unwrap();
        assert_eq!(vars.len(), 4);

        let mut unique_vars = vars.clone();
        unique_vars.sort();
        unique_vars.dedup();
        assert_eq!(vars.len(), unique_vars.len());
    }

    #[test]
    fn test_statistics() {
        let mut vm = VariableManager::new(3, 3, 1);

        vm.cell_variable(0, 0).unwrap();
        vm.cell_variable(1, 1).unwrap();
        vm.placement_variable(0, 0, 0, Orientation::South).unwrap();
        vm.fresh_aux();

        let stats = vm.statistics();
        assert_eq!(stats.total_variables, 4);
        assert_eq!(stats.cell_variables, 2);
        assert_eq!(stats.placement_variables, 1);
        assert_eq!(stats.auxiliary_variables, 1);
    }
}
