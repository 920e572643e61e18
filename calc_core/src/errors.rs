//! # Error Types
//!
//! Structured error types for calc_core. Two kinds of failure exist on the
//! site: a form value that does not pass validation (the calculation is
//! never run) and a failed call to the external model provider behind the
//! algebra flow. Everything else is a lookup miss or an internal fault.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_divisor(divisor: f64) -> CalcResult<()> {
//!     if divisor == 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "divisor",
//!             divisor.to_string(),
//!             "Divisor cannot be zero",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
///
/// Serializes with a `type` discriminator so front ends can render the
/// message inline next to the offending field.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (not a number, out of range, zero divisor, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing or blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Unit key not present in the quantity's unit table
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { quantity: String, unit: String },

    /// Requested page or calculator does not exist
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// The external model provider failed or returned nothing usable
    #[error("Upstream failure from {service}: {reason}")]
    UpstreamFailure { service: String, reason: String },

    /// Configuration file or environment override is invalid
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(what: impl Into<String>) -> Self {
        CalcError::NotFound { what: what.into() }
    }

    /// Create an UpstreamFailure error
    pub fn upstream(service: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::UpstreamFailure {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            reason: reason.into(),
        }
    }

    /// True for errors raised at the form boundary, before any calculation ran.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::MissingField { .. } | CalcError::UnknownUnit { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::NotFound { .. } => "NOT_FOUND",
            CalcError::UpstreamFailure { .. } => "UPSTREAM_FAILURE",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
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
