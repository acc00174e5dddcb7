//! File I/O for puzzle specs and solution grids

use super::{CellState, Grid, PuzzleSpec};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Load a puzzle from a `.sf` file
///
/// Line-oriented format: `c` starts a comment, `rows <ints>` and
/// `columns <ints>` give the required counts, `ships <ints>` the fleet,
/// `piece <row> <col>` / `water <row> <col>` the known cells.
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<PuzzleSpec> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle_from_str(&content)
        .with_context(|| format!("Failed to parse puzzle file: {}", path.as_ref().display()))
}

/// Parse a puzzle from its text representation
pub fn parse_puzzle_from_str(content: &str) -> Result<PuzzleSpec> {
    let mut rows: Option<Vec<usize>> = None;
    let mut columns: Option<Vec<usize>> = None;
    let mut ships: Vec<usize> = Vec::new();
    let mut fixed_cells: BTreeMap<(usize, usize), CellState> = BTreeMap::new();

    for (line_no, line) in content.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&directive) = tokens.first() else {
            continue; // blank line
        };

        match directive {
            "c" => continue,
            "rows" => {
                rows = Some(parse_counts(&tokens[1..], line_no, "rows")?);
            }
            "columns" => {
                columns = Some(parse_counts(&tokens[1..], line_no, "columns")?);
            }
            "ships" => {
                ships = parse_counts(&tokens[1..], line_no, "ships")?;
            }
            "piece" | "water" => {
                let (row, col) = parse_cell(&tokens[1..], line_no, directive)?;
                let state = if directive == "piece" {
                    CellState::Piece
                } else {
                    CellState::Water
                };
                fixed_cells.insert((row, col), state);
            }
            other => {
                anyhow::bail!("Unrecognized directive '{}' on line {}", other, line_no + 1);
            }
        }
    }

    let rows = rows.ok_or_else(|| anyhow::anyhow!("Missing 'rows' directive"))?;
    let columns = columns.ok_or_else(|| anyhow::anyhow!("Missing 'columns' directive"))?;

    PuzzleSpec::new(rows, columns, ships, fixed_cells)
}

fn parse_counts(tokens: &[&str], line_no: usize, directive: &str) -> Result<Vec<usize>> {
    tokens
        .iter()
        .map(|token| {
            token.parse::<usize>().with_context(|| {
                format!(
                    "Invalid integer '{}' in '{}' directive on line {}",
                    token,
                    directive,
                    line_no + 1
                )
            })
        })
        .collect()
}

fn parse_cell(tokens: &[&str], line_no: usize, directive: &str) -> Result<(usize, usize)> {
    if tokens.len() != 2 {
        anyhow::bail!(
            "'{}' directive on line {} expects exactly two coordinates, got {}",
            directive,
            line_no + 1,
            tokens.len()
        );
    }
    let parsed = parse_counts(tokens, line_no, directive)?;
    Ok((parsed[0], parsed[1]))
}

/// Load a solution grid from a text file of '0'/'1' rows
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_str(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from a string of '0'/'1' rows
pub fn parse_grid_from_str(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        cells.push(row);
    }

    Grid::from_cells(cells)
}

/// Save a solution grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid.to_string())
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example puzzle files for testing and setup
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Two isolated submarines on opposing corners
    let submarines = "c two submarines, 3x3\n\
                      rows 1 0 1\n\
                      columns 1 0 1\n\
                      ships 1 1\n";
    std::fs::write(dir.join("submarines.sf"), submarines)
        .context("Failed to write submarines.sf")?;

    // Single full-width ship on a one-row grid
    let strip = "c one ship filling a 1x3 strip\n\
                 rows 3\n\
                 columns 1 1 1\n\
                 ships 3\n";
    std::fs::write(dir.join("strip.sf"), strip).context("Failed to write strip.sf")?;

    // 6x6 fleet with a known hit and a known miss
    let fleet = "c 6x6 fleet puzzle\n\
                 rows 3 0 1 1 2 2\n\
                 columns 2 1 1 2 1 2\n\
                 ships 3 2 2 1 1\n\
                 piece 0 0\n\
                 water 3 3\n";
    std::fs::write(dir.join("fleet.sf"), fleet).context("Failed to write fleet.sf")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_puzzle() {
        let content = "c a comment\n\
                       rows 1 0 1\n\
                       columns 1 0 1\n\
                       ships 1 1\n\
                       piece 0 0\n\
                       water 2 0\n";
        let puzzle = parse_puzzle_from_str(content).unwrap();

        assert_eq!(puzzle.rows(), &[1, 0, 1]);
        assert_eq!(puzzle.columns(), &[1, 0, 1]);
        assert_eq!(puzzle.ships(), &[1, 1]);
        assert_eq!(
            puzzle.fixed_cells().get(&(0, 0)),
            Some(&CellState::Piece)
        );
        assert_eq!(
            puzzle.fixed_cells().get(&(2, 0)),
            Some(&CellState::Water)
        );
    }

    #[test]
    fn test_parse_puzzle_no_ships_directive() {
        let content = "rows 0\ncolumns 0\n";
        let puzzle = parse_puzzle_from_str(content).unwrap();
        assert!(puzzle.ships().is_empty());
    }

    #[test]
    fn test_unknown_directive() {
        let content = "rows 1\ncolumns 1\nboats 2\n";
        let err = parse_puzzle_from_str(content).unwrap_err();
        assert!(err.to_string().contains("boats"));
    }

    #[test]
    fn test_missing_required_directive() {
        assert!(parse_puzzle_from_str("rows 1 1\n").is_err());
        assert!(parse_puzzle_from_str("columns 1 1\n").is_err());
    }

    #[test]
    fn test_fixed_cell_out_of_range() {
        let content = "rows 1 1\ncolumns 1 1\nships 1\npiece 5 0\n";
        assert!(parse_puzzle_from_str(content).is_err());
    }

    #[test]
    fn test_malformed_cell_directive() {
        let content = "rows 1\ncolumns 1\npiece 0\n";
        assert!(parse_puzzle_from_str(content).is_err());

        let content = "rows 1\ncolumns 1\nwater 0 x\n";
        assert!(parse_puzzle_from_str(content).is_err());
    }

    #[test]
    fn test_grid_round_trip() {
        let content = "010\n101\n";
        let grid = parse_grid_from_str(content).unwrap();
        assert_eq!(grid.to_string(), content);
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn test_grid_invalid_input() {
        assert!(parse_grid_from_str("01\n1X\n").is_err());
        assert!(parse_grid_from_str("010\n11\n").is_err());
        assert!(parse_grid_from_str("").is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let grid_path = temp_dir.path().join("solution.txt");

        let grid = Grid::from_cells(vec![vec![true, false], vec![false, true]]).unwrap();
        save_grid_to_file(&grid, &grid_path).unwrap();

        let loaded = load_grid_from_file(&grid_path).unwrap();
        assert_eq!(grid, loaded);
    }

    #[test]
    fn test_create_example_puzzles() {
        let temp_dir = tempdir().unwrap();
        create_example_puzzles(temp_dir.path()).unwrap();

        for name in ["submarines.sf", "strip.sf", "fleet.sf"] {
            let puzzle = load_puzzle_from_file(temp_dir.path().join(name)).unwrap();
            assert!(puzzle.height() > 0 && puzzle.width() > 0);
        }

        let fleet = load_puzzle_from_file(temp_dir.path().join("fleet.sf")).unwrap();
        assert_eq!(fleet.ships().len(), 5);
        assert_eq!(fleet.total_ship_parts(), 9);
        // Counts are consistent with the fleet size
        assert_eq!(fleet.rows().iter().sum::<usize>(), 9);
        assert_eq!(fleet.columns().iter().sum::<usize>(), 9);
    }
}
