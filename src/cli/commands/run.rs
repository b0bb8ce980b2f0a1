//! Run command implementation
//!
//! This module implements the `run` command, which runs the pipeline once
//! over the configured input directory.

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::pipeline::{Pipeline, PipelineResult};
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Compute statistics in memory even if the database is enabled
    #[arg(long)]
    pub in_memory: bool,

    /// Print the pipeline result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_FAILURE);
            }
        };

        if self.in_memory && config.load.use_database {
            tracing::info!("Forcing in-memory load from CLI");
            config.load.use_database = false;
        }

        let mut pipeline = Pipeline::from_config(&config).await;
        let result = pipeline.run().await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_summary(&result);
        }

        Ok(if result.success {
            EXIT_SUCCESS
        } else {
            EXIT_FAILURE
        })
    }
}

fn print_summary(result: &PipelineResult) {
    println!();
    println!("📊 Pipeline Summary:");
    println!("  Files Processed: {}", result.files_processed);
    println!("  Files Failed: {}", result.files_failed);
    println!("  Rows Skipped: {}", result.rows_skipped);
    println!("  Records Extracted: {}", result.records_extracted);
    println!("  Records Transformed: {}", result.records_transformed);
    println!("  Records Rejected: {}", result.records_rejected);
    println!("  Records Loaded: {}", result.records_loaded);
    if let Some(mode) = result.load_mode {
        println!("  Load Mode: {mode}");
    }
    println!("  Duration: {:.2}s", result.duration.as_secs_f64());
    println!();

    if !result.statistics.is_empty() {
        println!("📈 Statistics:");
        for (name, value) in result.statistics.iter() {
            println!("  {name}: {value}");
        }
        println!();
    }

    if result.success {
        println!("✅ Pipeline completed successfully!");
    } else {
        println!(
            "❌ Pipeline failed: {}",
            result.error_message.as_deref().unwrap_or("unknown error")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir) -> String {
        let path = dir.path().join("derrick.toml");
        let toml = format!(
            "[paths]\ninput_dir = \"{}\"\nprocessed_dir = \"{}\"\nerror_dir = \"{}\"\n",
            dir.path().join("in").display(),
            dir.path().join("done").display(),
            dir.path().join("err").display(),
        );
        fs::write(&path, toml).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_run_args_defaults() {
        let args = RunArgs {
            in_memory: false,
            json: false,
        };
        assert!(!args.in_memory);
        assert!(!args.json);
    }

    #[tokio::test]
    async fn test_run_missing_config_fails() {
        let args = RunArgs {
            in_memory: false,
            json: false,
        };
        let code = args.execute("/nonexistent/derrick.toml").await.unwrap();
        assert_eq!(code, EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_run_empty_input_succeeds() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir);

        let args = RunArgs {
            in_memory: true,
            json: true,
        };
        let code = args.execute(&config_path).await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert!(dir.path().join("in").is_dir());
    }
}
