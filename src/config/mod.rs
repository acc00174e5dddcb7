//! Configuration management for the Battleship puzzle solver

pub mod settings;

pub use settings::{
    CliOverrides, EncodingConfig, InputConfig, OutputConfig, OutputFormat, Settings, SolverConfig,
};
