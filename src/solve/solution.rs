//! Solution representation for Battleship puzzles

use crate::puzzle::{Grid, ShipPlacement};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Represents a solved Battleship grid together with the fleet layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The occupancy grid
    pub grid: Grid,
    /// Where each ship ended up
    pub placements: Vec<ShipPlacement>,
    /// Time taken to find this solution
    #[serde(skip)]
    pub solve_time: Duration,
    /// Metadata about the solution
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Unique identifier for this solution
    pub id: String,
    /// Number of occupied cells in the grid
    pub occupied_cells: usize,
    /// Number of ships in the fleet
    pub ship_count: usize,
    /// Fraction of the grid occupied by ship parts (0.0 to 1.0)
    pub density: f64,
}

impl Solution {
    /// Create a new solution
    pub fn new(grid: Grid, placements: Vec<ShipPlacement>, solve_time: Duration) -> Self {
        let metadata = SolutionMetadata::analyze(&grid, &placements);

        Self {
            grid,
            placements,
            solve_time,
            metadata,
        }
    }

    /// Get the solved grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the fleet layout
    pub fn placements(&self) -> &[ShipPlacement] {
        &self.placements
    }

    /// Check if this solution is equivalent to another (same grid)
    pub fn is_equivalent_to(&self, other: &Solution) -> bool {
        self.grid == other.grid
    }

    /// Get a summary of the solution
    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            id: self.metadata.id.clone(),
            occupied_cells: self.metadata.occupied_cells,
            ship_count: self.metadata.ship_count,
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Get a text rendering of the grid and fleet
    pub fn format_layout(&self) -> String {
        let mut result = String::new();

        result.push_str(&format!(
            "Solution {} - {} ships, {} occupied cells\n",
            self.metadata.id, self.metadata.ship_count, self.metadata.occupied_cells
        ));
        result.push_str(&format!(
            "Solve time: {:.3}s\n\n",
            self.solve_time.as_secs_f64()
        ));
        result.push_str(&self.grid.to_string());
        result.push('\n');

        for placement in &self.placements {
            result.push_str(&format!(
                "Ship {}: length {} at ({}, {}) heading {:?}\n",
                placement.ship, placement.length, placement.row, placement.col, placement.orientation
            ));
        }

        result
    }
}

impl SolutionMetadata {
    /// Analyze a solution and create metadata
    pub fn analyze(grid: &Grid, placements: &[ShipPlacement]) -> Self {
        let id = Self::generate_id(grid);
        let occupied_cells = grid.occupied_count();
        let total_cells = grid.width * grid.height;
        let density = if total_cells == 0 {
            0.0
        } else {
            occupied_cells as f64 / total_cells as f64
        };

        Self {
            id,
            occupied_cells,
            ship_count: placements.len(),
            density,
        }
    }

    /// Generate a unique ID for the solution based on the grid contents
    fn generate_id(grid: &Grid) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        grid.cells.hash(&mut hasher);
        grid.width.hash(&mut hasher);
        grid.height.hash(&mut hasher);

        format!("sol_{:x}", hasher.finish())
    }
}

/// Summary of a solution for display purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub id: String,
    pub occupied_cells: usize,
    pub ship_count: usize,
    pub solve_time_ms: u64,
}

impl std::fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution {}: {} ships, {} occupied cells, {}ms",
            self.id, self.ship_count, self.occupied_cells, self.solve_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Orientation;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, true).unwrap();
        grid.set(2, 2, true).unwrap();
        grid
    }

    fn sample_placements() -> Vec<ShipPlacement> {
        vec![
            ShipPlacement {
                row: 0,
                col: 0,
                ship: 0,
                orientation: Orientation::South,
                length: 1,
            },
            ShipPlacement {
                row: 2,
                col: 2,
                ship: 1,
                orientation: Orientation::South,
                length: 1,
            },
        ]
    }

    #[test]
    fn test_solution_creation() {
        let solution = Solution::new(
            sample_grid(),
            sample_placements(),
            Duration::from_millis(100),
        );

        assert_eq!(solution.metadata.occupied_cells, 2);
        assert_eq!(solution.metadata.ship_count, 2);
        assert!(!solution.metadata.id.is_empty());
        assert!((solution.metadata.density - 2.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_solution_equivalence_ignores_timing() {
        let solution1 = Solution::new(
            sample_grid(),
            sample_placements(),
            Duration::from_millis(100),
        );
        let solution2 = Solution::new(
            sample_grid(),
            sample_placements(),
            Duration::from_millis(200),
        );

        assert!(solution1.is_equivalent_to(&solution2));
        assert_eq!(solution1.metadata.id, solution2.metadata.id);
    }

    #[test]
    fn test_json_round_trip() {
        let solution = Solution::new(
            sample_grid(),
            sample_placements(),
            Duration::from_millis(100),
        );

        let json = solution.to_json().unwrap();
        let restored = Solution::from_json(&json).unwrap();

        assert_eq!(restored.grid, solution.grid);
        assert_eq!(restored.placements, solution.placements);
        assert_eq!(restored.metadata.id, solution.metadata.id);
    }

    #[test]
    fn test_format_layout_mentions_every_ship() {
        let solution = Solution::new(
            sample_grid(),
            sample_placements(),
            Duration::from_millis(100),
        );

        let text = solution.format_layout();
        assert!(text.contains("Ship 0"));
        assert!(text.contains("Ship 1"));
    }
}
