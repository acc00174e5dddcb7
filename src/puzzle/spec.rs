//! Puzzle specification for Battleship-style logic puzzles

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Known state of a fixed cell in the puzzle input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Cell is known to hold a ship part
    Piece,
    /// Cell is known to be water
    Water,
}

/// Direction a ship extends from its origin cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Horizontal, cells at (row, col..col+length)
    East,
    /// Vertical, cells at (row..row+length, col)
    South,
}

/// Immutable description of one puzzle instance
///
/// `rows[i]` / `columns[j]` give the required number of ship parts in that
/// line. `ships[k]` is the length of ship `k`. `fixed_cells` holds the
/// partial assignment of known hits and misses; a `BTreeMap` so that clause
/// emission iterates it in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSpec {
    rows: Vec<usize>,
    columns: Vec<usize>,
    ships: Vec<usize>,
    fixed_cells: BTreeMap<(usize, usize), CellState>,
}

impl PuzzleSpec {
    /// Create a puzzle spec, validating dimensions and fixed-cell bounds
    pub fn new(
        rows: Vec<usize>,
        columns: Vec<usize>,
        ships: Vec<usize>,
        fixed_cells: BTreeMap<(usize, usize), CellState>,
    ) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Puzzle must have at least one row");
        }
        if columns.is_empty() {
            anyhow::bail!("Puzzle must have at least one column");
        }
        if ships.iter().any(|&length| length == 0) {
            anyhow::bail!("Ship lengths must be positive");
        }

        for &(row, col) in fixed_cells.keys() {
            if row >= rows.len() || col >= columns.len() {
                anyhow::bail!(
                    "Fixed cell ({}, {}) out of bounds for {}x{} grid",
                    row,
                    col,
                    rows.len(),
                    columns.len()
                );
            }
        }

        Ok(Self {
            rows,
            columns,
            ships,
            fixed_cells,
        })
    }

    /// Number of rows in the grid
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the grid
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Required ship-part counts per row
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Required ship-part counts per column
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Ship lengths by ship index
    pub fn ships(&self) -> &[usize] {
        &self.ships
    }

    /// Known hits and misses
    pub fn fixed_cells(&self) -> &BTreeMap<(usize, usize), CellState> {
        &self.fixed_cells
    }

    /// Total number of ship parts the fleet will occupy
    pub fn total_ship_parts(&self) -> usize {
        self.ships.iter().sum()
    }
}

/// A decoded ship placement: origin cell, ship index, orientation, length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub row: usize,
    pub col: usize,
    pub ship: usize,
    pub orientation: Orientation,
    pub length: usize,
}

impl ShipPlacement {
    /// The footprint: every cell this placement occupies
    pub fn cells(&self) -> Vec<(usize, usize)> {
        (0..self.length)
            .map(|offset| match self.orientation {
                Orientation::East => (self.row, self.col + offset),
                Orientation::South => (self.row + offset, self.col),
            })
            .collect()
    }

    /// Whether the whole footprint fits inside a height x width grid
    pub fn in_bounds(&self, height: usize, width: usize) -> bool {
        match self.orientation {
            Orientation::East => self.row < height && self.col + self.length <= width,
            Orientation::South => self.row + self.length <= height && self.col < width,
        }
    }
}

impl std::fmt::Display for ShipPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ship {} (length {}) at ({}, {}) {:?}",
            self.ship, self.length, self.row, self.col, self.orientation
        )
    }
}
