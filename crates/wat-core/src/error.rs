//! Unified error types for the wat crates
//!
//! This module provides a common error type [`WatError`] that can represent
//! errors from any part of the toolkit. Domain-specific failures are
//! converted to `WatError` for uniform handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use wat_core::{WatError, WatResult};
//!
//! fn fit_site(path: &str) -> WatResult<()> {
//!     let speeds = load_speeds(path)?;
//!     fit_weibull(&speeds)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all wat operations.
///
/// Covers I/O, parsing, input validation, and configuration failures so the
/// three analysis pipelines can report errors uniformly.
#[derive(Error, Debug)]
pub enum WatError {
    /// I/O errors (file access, rendering output, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing errors in measurement or power-curve files
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors (empty sample sets, degenerate fits, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors (invalid parameter structs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using WatError.
pub type WatResult<T> = Result<T, WatError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for WatError {
    fn from(err: anyhow::Error) -> Self {
        WatError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for WatError {
    fn from(s: String) -> Self {
        WatError::Other(s)
    }
}

impl From<&str> for WatError {
    fn from(s: &str) -> Self {
        WatError::Other(s.to_string())
    }
}
