//! Domain error types
//!
//! This module defines the error hierarchy for Derrick.
//! Errors don't expose third-party types; foreign errors are converted to
//! their message at the boundary.

use thiserror::Error;

/// Main Derrick error type
///
/// This is the primary error type used throughout the application. Errors of
/// this type are fatal to whatever stage returns them; recoverable row and
/// file problems are reported through [`RowError`] and [`FileError`] instead.
#[derive(Debug, Error)]
pub enum DerrickError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database errors (schema creation, inserts, queries)
    #[error("Database error: {0}")]
    Database(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Extraction errors that are not isolated to a single file
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// A single input row that could not be turned into a valid raw record
///
/// Row errors never abort a file; they are logged and counted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// The CSV reader could not decode the row
    #[error("line {line}: unreadable row: {message}")]
    Unreadable { line: u64, message: String },

    /// A required cell was missing or blank
    #[error("line {line}: missing required field {field}")]
    MissingField { line: u64, field: &'static str },

    /// A cell could not be coerced to its semantic type
    #[error("line {line}: invalid {field} value '{value}'")]
    InvalidValue {
        line: u64,
        field: &'static str,
        value: String,
    },

    /// The coerced record failed validation
    #[error("line {line}: record for well '{well_id}' failed validation")]
    Rejected { line: u64, well_id: String },
}

/// A whole input file that could not be read structurally
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FileError {
    /// The file could not be opened
    #[error("cannot open {path}: {message}")]
    Open { path: String, message: String },

    /// The header row could not be read
    #[error("cannot read header of {path}: {message}")]
    Header { path: String, message: String },

    /// Reading failed after the header, part way through the rows
    #[error("read of {path} failed part way through: {message}")]
    Read { path: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for DerrickError {
    fn from(err: std::io::Error) -> Self {
        DerrickError::Io(err.to_string())
    }
}
