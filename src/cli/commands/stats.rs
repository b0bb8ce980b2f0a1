//! Stats command implementation
//!
//! This module implements the `stats` command, which prints aggregate
//! statistics computed by the database over every loaded row.

use crate::adapters::database::create_record_store;
use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Fetching production statistics");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(EXIT_FAILURE);
            }
        };

        let store = match create_record_store(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Database is not configured");
                println!("   Error: {}", e);
                return Ok(EXIT_FAILURE);
            }
        };

        if let Err(e) = store.test_connection().await {
            println!("❌ Failed to connect to database");
            println!("   Error: {}", e);
            return Ok(EXIT_FAILURE);
        }

        let statistics = match store.fetch_statistics().await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to compute statistics");
                println!("   Error: {}", e);
                return Ok(EXIT_FAILURE);
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&statistics)?);
            return Ok(EXIT_SUCCESS);
        }

        if statistics.is_empty() {
            println!("No production records loaded yet.");
            println!("Run 'derrick run' with load.use_database = true to load data.");
            return Ok(EXIT_SUCCESS);
        }

        println!("📈 Production Statistics ({}):", store.backend_name());
        for (name, value) in statistics.iter() {
            println!("  {:<22} {}", name, value);
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}
