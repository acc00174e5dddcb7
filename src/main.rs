//! Main CLI application for the Battleship puzzle solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ship_find::{
    config::{CliOverrides, Settings},
    puzzle::{create_example_puzzles, load_grid_from_file, load_puzzle_from_file},
    sat::EncodingError,
    solve::{PuzzleProblem, SolutionChecker},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ship_find")]
#[command(about = "Battleship Puzzle SAT Solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a Battleship puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Maximum solutions to find (overrides config)
        #[arg(short, long)]
        max_solutions: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the fleet layout for each solution
        #[arg(long)]
        show_fleet: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a solved grid against a puzzle
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Solved grid file (rows of 0s and 1s)
        #[arg(short, long)]
        grid: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            max_solutions,
            output,
            show_fleet,
            verbose,
        } => solve_command(config, puzzle, max_solutions, output, show_fleet, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Check {
            config,
            puzzle,
            grid,
        } => check_command(config, puzzle, grid),
    }
}

fn solve_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    max_solutions: Option<usize>,
    output_dir: Option<PathBuf>,
    show_fleet: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting Battleship Puzzle Solver"));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    // Apply CLI overrides
    let cli_overrides = CliOverrides {
        max_solutions,
        puzzle_file: puzzle_file.clone(),
        output_dir: output_dir.clone(),
    };
    settings.merge_with_cli(&cli_overrides);

    if verbose {
        println!("Configuration:");
        println!("  Max solutions: {}", settings.solver.max_solutions);
        println!("  Puzzle file: {}", settings.input.puzzle_file.display());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings
        .validate()
        .context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut problem =
        PuzzleProblem::new(settings.clone()).context("Failed to create puzzle problem")?;

    println!(
        "{}",
        ColorOutput::info("Generating SAT constraints and solving...")
    );
    let solutions = match problem.solve() {
        Ok(solutions) => solutions,
        Err(e) => {
            // A ship with no legal placement makes the formula unsatisfiable
            // before the solver ever runs; report that case distinctly.
            if let Some(encoding_error) = e.downcast_ref::<EncodingError>() {
                println!(
                    "{}",
                    ColorOutput::error(&format!(
                        "Puzzle is unsatisfiable by construction: {}",
                        encoding_error
                    ))
                );
                return Ok(());
            }
            return Err(e.context("Failed to solve puzzle"));
        }
    };

    let total_time = start_time.elapsed();

    if solutions.is_empty() {
        println!("{}", ColorOutput::warning("No solutions found"));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} solution(s) in {:.3}s",
            solutions.len(),
            total_time.as_secs_f64()
        ))
    );

    // Display solutions
    if show_fleet {
        for (i, solution) in solutions.iter().enumerate() {
            println!("\n{}", ColorOutput::info(&format!("Solution {}:", i + 1)));
            println!("{}", SolutionFormatter::format_solution(solution, true));
        }
    } else {
        println!("\n{}", SolutionFormatter::format_solution_summary(&solutions));

        if solutions.len() <= 3 {
            println!("\n{}", ColorOutput::info("Solution Details:"));
            for (i, solution) in solutions.iter().enumerate() {
                println!("\n{}", ColorOutput::info(&format!("Solution {}:", i + 1)));
                println!("{}", SolutionFormatter::format_solution(solution, false));
            }
        }
    }

    // Save solutions
    println!("\n{}", ColorOutput::info("Saving solutions..."));
    SolutionFormatter::save_solutions(
        &solutions,
        &settings.output.output_directory,
        &settings.output.format,
    )
    .context("Failed to save solutions")?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Solutions saved to {}",
            settings.output.output_directory.display()
        ))
    );

    if verbose {
        println!("\n{}", problem.encoding_statistics());
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Create example puzzles
    create_example_puzzles(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    // Create example configuration variants
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut simple_config = Settings::default();
    simple_config.solver.max_solutions = 3;
    simple_config.input.puzzle_file = PathBuf::from("input/puzzles/submarines.sf");
    simple_config.to_file(&examples_dir.join("simple.yaml"))?;

    let mut fleet_config = Settings::default();
    fleet_config.solver.max_solutions = 10;
    fleet_config.input.puzzle_file = PathBuf::from("input/puzzles/fleet.sf");
    fleet_config.to_file(&examples_dir.join("fleet.yaml"))?;

    println!(
        "Created example configurations in: {}",
        examples_dir.display()
    );

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your puzzles to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn check_command(config_path: PathBuf, puzzle_path: PathBuf, grid_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("Checking solution..."));

    // Configuration is loaded for symmetry with solve; the checker itself
    // only needs the puzzle.
    let _settings = if config_path.exists() {
        Settings::from_file(&config_path)?
    } else {
        Settings::default()
    };

    let puzzle = load_puzzle_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let grid = load_grid_from_file(&grid_path)
        .with_context(|| format!("Failed to load grid from {}", grid_path.display()))?;

    println!("Grid ({}x{}):", grid.height, grid.width);
    println!("{}", SolutionFormatter::format_grid_with_coords(&grid));

    let checker = SolutionChecker::new(puzzle);
    let result = checker.check_grid(&grid).context("Check failed")?;

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
        for violation in &result.violations {
            println!("  - {}", violation);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "ship_find",
            "solve",
            "--config",
            "test.yaml",
            "--max-solutions",
            "5",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/puzzles/submarines.sf").exists());
    }
}
