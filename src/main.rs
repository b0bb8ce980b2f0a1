// Derrick - Well Production CSV ETL
// Copyright (c) 2025 Derrick Contributors
// Licensed under the MIT License

use clap::Parser;
use derrick::cli::{Cli, Commands, EXIT_FAILURE};
use derrick::config::{load_config, LoggingConfig};
use derrick::log_error_with_context;
use derrick::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; commands
    // report config errors themselves, so a bad file falls back to console only
    let (config_level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (Some(config.application.log_level), config.logging),
        Err(_) => (None, LoggingConfig::default()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Derrick - Well Production CSV ETL"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FAILURE
        }
    };

    // process::exit skips destructors; flush the file logger first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Run(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
        Commands::Stats(args) => args.execute(&cli.config).await,
    }
}
