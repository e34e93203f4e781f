//! # Error Types
//!
//! Structured error types for awj_core. Every variant serializes to JSON so a
//! calling layer (web handler, CLI, another service) can forward the failure
//! without string parsing.
//!
//! ## Example
//!
//! ```rust
//! use awj_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> CalcResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "thickness",
//!             thickness_mm.to_string(),
//!             "Thickness must be greater than 0 mm",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_thickness(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for awj_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside the accepted range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An operation would divide by a zero (or non-positive) quantity
    #[error("Division by zero in {operation}: '{field}' must be positive")]
    DivisionByZero { operation: String, field: String },

    /// A computed value came out as NaN or infinite
    #[error("Non-finite result for '{field}'")]
    NonFiniteResult { field: String },

    /// Unknown optimization target selector
    #[error("Invalid target '{target}'. Use \"max_speed\" or \"min_cost\"")]
    InvalidTarget { target: String },

    /// Batch request is malformed (no variations, too many, ...)
    #[error("Batch error: {reason}")]
    BatchError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Settings could not be parsed
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(operation: impl Into<String>, field: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            operation: operation.into(),
            field: field.into(),
        }
    }

    /// Create a NonFiniteResult error
    pub fn non_finite(field: impl Into<String>) -> Self {
        CalcError::NonFiniteResult { field: field.into() }
    }

    /// Create an InvalidTarget error
    pub fn invalid_target(target: impl Into<String>) -> Self {
        CalcError::InvalidTarget { target: target.into() }
    }

    /// Create a BatchError
    pub fn batch(reason: impl Into<String>) -> Self {
        CalcError::BatchError { reason: reason.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::ConfigError { reason: reason.into() }
    }

    /// True for errors caused by the caller's parameters rather than by I/O
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::DivisionByZero { .. }
                | CalcError::InvalidTarget { .. }
                | CalcError::BatchError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::NonFiniteResult { .. } => "NON_FINITE_RESULT",
            CalcError::InvalidTarget { .. } => "INVALID_TARGET",
            CalcError::BatchError { .. } => "BATCH_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN and infinities before they leave the engine.
pub(crate) fn ensure_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite(field))
    }
}
