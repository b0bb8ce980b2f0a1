//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use derrick::logging::init_logging;
//! use derrick::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use derrick::log_error_with_context;
/// use derrick::domain::DerrickError;
///
/// let error = DerrickError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log where an input file was routed
///
/// # Example
///
/// ```no_run
/// use derrick::log_file_routed;
/// use std::path::Path;
///
/// log_file_routed!(Path::new("input/day1.csv"), Path::new("processed/day1.csv"), 42);
/// ```
#[macro_export]
macro_rules! log_file_routed {
    ($source:expr, $destination:expr, $records:expr) => {
        tracing::info!(
            source = %$source.display(),
            destination = %$destination.display(),
            records = $records,
            "Input file routed"
        );
    };
}
