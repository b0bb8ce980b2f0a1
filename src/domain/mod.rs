//! Domain models and types for Derrick.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Production records** ([`RawRecord`], [`CleanRecord`])
//! - **Error types** ([`DerrickError`], [`RowError`], [`FileError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fatal operations return [`Result<T, DerrickError>`]. Problems confined to a
//! single row or file are values ([`RowError`], [`FileError`]) that the
//! extractor counts and logs rather than propagates:
//!
//! ```rust
//! use derrick::domain::{DerrickError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = derrick::config::load_config("derrick.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! # Builder Pattern
//!
//! ```rust
//! use derrick::domain::RawRecordBuilder;
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = RawRecordBuilder::new()
//!     .well_id("WELL-042")
//!     .production_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
//!     .oil_production(120.5)
//!     .status("Maintenance")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod record;
pub mod result;

pub use errors::{DerrickError, FileError, RowError};
pub use record::{CleanRecord, RawRecord, RawRecordBuilder};
pub use result::Result;
