//! Result type alias for Derrick
//!
//! This module provides a convenient Result type alias that uses DerrickError
//! as the error type.

use super::errors::DerrickError;

/// Result type alias for Derrick operations
///
/// # Examples
///
/// ```
/// use derrick::domain::result::Result;
/// use derrick::domain::errors::DerrickError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DerrickError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DerrickError>;
