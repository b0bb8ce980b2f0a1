// Derrick - Well Production CSV ETL
// Copyright (c) 2025 Derrick Contributors
// Licensed under the MIT License

//! # Derrick - Well Production CSV ETL
//!
//! Derrick reads daily well production readings from CSV files, cleans them,
//! and either loads them into PostgreSQL or summarizes them in memory.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** rows from every CSV file in an input directory, routing
//!   each file to a processed or error directory
//! - **Transforming** readings: status normalization, volume clamping,
//!   oil/gas ratio and water cut
//! - **Loading** into PostgreSQL, or computing aggregate statistics when the
//!   database is disabled or unreachable
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - ETL stages and pipeline orchestration
//! - [`adapters`] - Record store trait and PostgreSQL implementation
//! - [`domain`] - Record types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use derrick::config::load_config;
//! use derrick::core::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("derrick.toml")?;
//!
//!     let mut pipeline = Pipeline::from_config(&config).await;
//!     let result = pipeline.run().await;
//!
//!     println!("Loaded {} records", result.records_loaded);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! A bad row is skipped and counted; a file that cannot be parsed is moved to
//! the error directory and the run continues with the next file. An
//! unreachable database downgrades the run to in-memory statistics. Only a
//! failed insert, after the database answered the connectivity probe, fails
//! the run.
//!
//! ## Error Handling
//!
//! Fatal errors use [`domain::DerrickError`]:
//!
//! ```rust,no_run
//! use derrick::domain::DerrickError;
//!
//! fn example() -> Result<(), DerrickError> {
//!     let config = derrick::config::load_config("derrick.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
