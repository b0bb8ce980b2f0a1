//! Core business logic for Derrick.
//!
//! This module contains the ETL stages and their orchestration.
//!
//! # Modules
//!
//! - [`validate`] - Record validity predicate
//! - [`extract`] - CSV extraction and file routing
//! - [`transform`] - Normalization and derived metrics
//! - [`load`] - Durable or in-memory loading
//! - [`pipeline`] - Run coordination and result reporting
//!
//! # Pipeline Workflow
//!
//! 1. **Extract**: Read every input file, keep valid rows, move each file to
//!    the processed or error directory
//! 2. **Transform**: Normalize statuses and volumes, re-validate, compute
//!    oil/gas ratio and water cut
//! 3. **Load**: Probe the store; insert into PostgreSQL, or compute
//!    statistics in memory if the store is disabled or unreachable
//! 4. **Report**: Produce one [`pipeline::PipelineResult`]
//!
//! # Example
//!
//! ```rust,no_run
//! use derrick::config::load_config;
//! use derrick::core::pipeline::Pipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("derrick.toml")?;
//!
//! let mut pipeline = Pipeline::from_config(&config).await;
//! let result = pipeline.run().await;
//!
//! println!("Extracted: {}", result.records_extracted);
//! println!("Loaded: {}", result.records_loaded);
//! println!("Success: {}", result.success);
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod load;
pub mod pipeline;
pub mod transform;
pub mod validate;
