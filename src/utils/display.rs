//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::puzzle::Grid;
use crate::solve::Solution;
use anyhow::Result;
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, show_fleet: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!(
            "Solve Time: {:.3}s\n",
            solution.solve_time.as_secs_f64()
        ));
        output.push_str(&format!(
            "Ship Parts: {} ({} ships)\n",
            solution.metadata.occupied_cells, solution.metadata.ship_count
        ));
        output.push('\n');

        output.push_str(&Self::format_grid_compact(&solution.grid));

        if show_fleet {
            output.push('\n');
            output.push_str("Fleet:\n");
            for placement in &solution.placements {
                output.push_str(&format!(
                    "  Ship {}: length {} at ({}, {}) heading {:?}\n",
                    placement.ship,
                    placement.length,
                    placement.row,
                    placement.col,
                    placement.orientation
                ));
            }
        }

        output
    }

    /// Format multiple solutions as a summary table
    pub fn format_solution_summary(solutions: &[Solution]) -> String {
        let mut output = String::new();

        output.push_str("Solutions Summary:\n");
        output.push_str("ID       | Time(ms) | Ships | Parts\n");
        output.push_str("---------|----------|-------|------\n");

        for solution in solutions {
            output.push_str(&format!(
                "{:8} | {:8} | {:5} | {}\n",
                &solution.metadata.id[..8.min(solution.metadata.id.len())],
                solution.solve_time.as_millis(),
                solution.metadata.ship_count,
                solution.metadata.occupied_cells
            ));
        }

        output
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for row in 0..grid.height {
            for col in 0..grid.width {
                output.push(if grid.get(row, col) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.width {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..grid.height {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.width {
                output.push_str(if grid.get(row, col) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format a grid as a boxed table with one cell per square
    pub fn format_grid_boxed(grid: &Grid) -> String {
        let mut output = String::new();
        let separator = "-".repeat(4 * grid.width + 1);

        output.push_str(&separator);
        output.push('\n');
        for row in 0..grid.height {
            output.push('|');
            for col in 0..grid.width {
                output.push_str(if grid.get(row, col) { " * |" } else { "   |" });
            }
            output.push('\n');
            output.push_str(&separator);
            output.push('\n');
        }

        output
    }

    /// Save solutions to files based on output format
    pub fn save_solutions<P: AsRef<Path>>(
        solutions: &[Solution],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filename = format!("solution_{:03}.txt", i + 1);
                    let filepath = output_dir.join(filename);
                    let content = Self::format_solution(solution, true);
                    std::fs::write(filepath, content)?;
                }
            }
            OutputFormat::Json => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filename = format!("solution_{:03}.json", i + 1);
                    let filepath = output_dir.join(filename);
                    solution.save_to_file(filepath)?;
                }

                // Also save a summary file
                let summary_path = output_dir.join("solutions_summary.json");
                let summaries: Vec<_> = solutions.iter().map(|s| s.summary()).collect();
                let summary_json = serde_json::to_string_pretty(&summaries)?;
                std::fs::write(summary_path, summary_json)?;
            }
            OutputFormat::Visual => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filename = format!("solution_{:03}_visual.txt", i + 1);
                    let filepath = output_dir.join(filename);
                    let content = Self::create_visual_solution(solution);
                    std::fs::write(filepath, content)?;
                }
            }
        }

        Ok(())
    }

    /// Create a boxed rendering of a solution with its fleet listing
    fn create_visual_solution(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!("Solution {}\n", solution.metadata.id));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&Self::format_grid_boxed(&solution.grid));
        output.push('\n');

        output.push_str("Fleet:\n");
        for placement in &solution.placements {
            output.push_str(&format!(
                "  Ship {}: length {} at ({}, {}) heading {:?}\n",
                placement.ship,
                placement.length,
                placement.row,
                placement.col,
                placement.orientation
            ));
        }

        output.push_str(&format!(
            "\nSolve Time: {:.3}s\n",
            solution.solve_time.as_secs_f64()
        ));

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Orientation, ShipPlacement};
    use std::time::Duration;

    fn sample_solution() -> Solution {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, true).unwrap();
        grid.set(2, 2, true).unwrap();
        let placements = vec![
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
        ];
        Solution::new(grid, placements, Duration::from_millis(42))
    }

    #[test]
    fn test_grid_formatting() {
        let solution = sample_solution();

        let compact = SolutionFormatter::format_grid_compact(&solution.grid);
        assert!(compact.contains('█'));
        assert!(compact.contains('·'));

        let with_coords = SolutionFormatter::format_grid_with_coords(&solution.grid);
        assert!(with_coords.contains(" 0"));
        assert!(with_coords.contains("██"));
    }

    #[test]
    fn test_boxed_grid_dimensions() {
        let solution = sample_solution();
        let boxed = SolutionFormatter::format_grid_boxed(&solution.grid);

        // One separator per row plus one, and one cell line per row
        assert_eq!(boxed.lines().count(), 2 * 3 + 1);
        assert!(boxed.contains(" * "));
    }

    #[test]
    fn test_solution_format_lists_fleet() {
        let solution = sample_solution();
        let text = SolutionFormatter::format_solution(&solution, true);

        assert!(text.contains("Ship 0"));
        assert!(text.contains("Ship 1"));
    }

    #[test]
    fn test_summary_table_has_one_row_per_solution() {
        let solutions = vec![sample_solution(), sample_solution()];
        let table = SolutionFormatter::format_solution_summary(&solutions);

        // Header, separator, and one line per solution
        assert_eq!(table.lines().count(), 3 + 2);
    }

    #[test]
    fn test_save_solutions_writes_files() {
        let solutions = vec![sample_solution()];
        let dir = tempfile::tempdir().unwrap();

        SolutionFormatter::save_solutions(&solutions, dir.path(), &OutputFormat::Json).unwrap();

        assert!(dir.path().join("solution_001.json").exists());
        assert!(dir.path().join("solutions_summary.json").exists());
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
