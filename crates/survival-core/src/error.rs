//! Error types for censored survival analysis
//!
//! Provides a unified error type for all survival-stats crates.

use thiserror::Error;

/// Core error type for survival analysis operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function (unknown selector, zero trials, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// An input required by the selected method was not supplied
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for an unrecognized selector string
    ///
    /// The message enumerates every accepted option.
    pub fn unknown_option(kind: &str, value: &str, options: &[&str]) -> Self {
        let options = options
            .iter()
            .map(|o| format!("'{o}'"))
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidParameter(format!(
            "{kind} '{value}' not recognized. Options are {options}"
        ))
    }

    /// Create an error for a missing required input
    pub fn missing_input(what: &str, required_by: &str) -> Self {
        Self::MissingInput(format!("{what} is required by {required_by}"))
    }

    /// Whether the error reports a bad argument supplied by the caller
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter(_) | Self::InvalidInput(_) | Self::InsufficientData { .. }
        )
    }
}
