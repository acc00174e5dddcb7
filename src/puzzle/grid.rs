//! Occupancy grid decoded from a satisfying model

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rows x cols matrix of ship-occupancy flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let height = cells.len();
        let width = cells[0].len();

        if width == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        let flat_cells: Vec<bool> = cells.into_iter().flatten().collect();

        Ok(Self {
            width,
            height,
            cells: flat_cells,
        })
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get cell value at coordinates; out-of-bounds cells read as water
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.cells[self.index(row, col)]
        } else {
            false
        }
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        if row >= self.height || col >= self.width {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} grid",
                row,
                col,
                self.height,
                self.width
            );
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Total number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Number of occupied cells in one row
    pub fn row_count(&self, row: usize) -> usize {
        (0..self.width).filter(|&col| self.get(row, col)).count()
    }

    /// Number of occupied cells in one column
    pub fn column_count(&self, col: usize) -> usize {
        (0..self.height).filter(|&row| self.get(row, col)).count()
    }

    /// Coordinates of all occupied cells, row-major
    pub fn occupied_cells(&self) -> Vec<(usize, usize)> {
        let mut occupied = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.get(row, col) {
                    occupied.push((row, col));
                }
            }
        }
        occupied
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", if self.get(row, col) { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
