//! Core error types for dayring-core.
//!
//! The mapping, grouping and interpolation functions are total and never
//! fail. Errors only arise at the boundary: when caller-supplied numbers are
//! validated into typed values, and when configuration is read or written.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayring-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Input validation errors.
///
/// Raised when a non-finite or out-of-range number reaches a boundary
/// constructor, before it can corrupt wrap/normalize arithmetic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// NaN or infinite input
    #[error("Non-finite value for '{field}': {value}")]
    NonFinite { field: String, value: f64 },

    /// Finite input outside the accepted range
    #[error("Value {value} for '{field}' is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Reject NaN and infinities, passing finite values through.
    pub fn check_finite(field: &str, value: f64) -> Result<f64, ValidationError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValidationError::NonFinite {
                field: field.to_string(),
                value,
            })
        }
    }

    /// Reject values that are non-finite or outside `[min, max]`.
    pub fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
        let value = Self::check_finite(field, value)?;
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
        Ok(value)
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
