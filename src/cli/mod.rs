//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Derrick using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for any failure: pipeline failure, bad configuration, or startup error
pub const EXIT_FAILURE: i32 = 1;

/// Derrick - well production CSV ETL
#[derive(Parser, Debug)]
#[command(name = "derrick")]
#[command(version, about, long_about = None)]
#[command(author = "Derrick Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "derrick.toml", env = "DERRICK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DERRICK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline once over the input directory
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Show aggregate statistics from the database
    Stats(commands::stats::StatsArgs),
}
