//! Configuration management for Derrick.
//!
//! Derrick reads a single TOML file at startup. The resulting
//! [`DerrickConfig`] is validated once and handed to the pipeline by value;
//! nothing re-reads configuration mid-run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use derrick::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("derrick.toml")?;
//!
//! println!("Input directory: {}", config.paths.input_dir);
//! println!("Use database: {}", config.load.use_database);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`PathsConfig`] - Input, processed and error directories
//! - [`LoadConfig`] - Durable (PostgreSQL) or in-memory load
//! - [`PostgreSQLConfig`] - PostgreSQL connection and pool settings
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [paths]
//! input_dir = "data/input"
//! processed_dir = "data/processed"
//! error_dir = "data/error"
//!
//! [load]
//! use_database = true
//!
//! [postgresql]
//! connection_string = "${DERRICK_PG_URL}"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing, and any
//! `DERRICK_<SECTION>_<KEY>` variable overrides the parsed value, e.g.
//! `DERRICK_PATHS_INPUT_DIR` or `DERRICK_LOAD_USE_DATABASE`.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DerrickConfig, LoadConfig, LoggingConfig, PathsConfig, PostgreSQLConfig,
};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
