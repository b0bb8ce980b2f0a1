//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Derrick configuration file.

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::{load_config, redact_connection_string};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config runs validation, so a loaded config is a valid one
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_FAILURE);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Input Directory: {}", config.paths.input_dir);
        println!("  Processed Directory: {}", config.paths.processed_dir);
        println!("  Error Directory: {}", config.paths.error_dir);
        println!("  File Extension: {}", config.paths.file_extension);
        println!(
            "  Load Mode: {}",
            if config.load.use_database {
                "database (with in-memory fallback)"
            } else {
                "in-memory"
            }
        );

        if let Some(ref pg_config) = config.postgresql {
            println!(
                "  PostgreSQL Connection: {}",
                redact_connection_string(&pg_config.connection_string)
            );
            println!("  Max Connections: {}", pg_config.max_connections);
        }

        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[paths]\ninput_dir = \"in\"\nprocessed_dir = \"done\"\nerror_dir = \"err\""
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }

    #[tokio::test]
    async fn test_validate_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[paths]\ninput_dir = \"same\"\nprocessed_dir = \"same\"\nerror_dir = \"err\""
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_FAILURE);
    }
}
