//! Error types for the Result Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while grading marks.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Result Engine.
///
/// Grading operations fail loudly with this type instead of guessing a
/// default scale; aggregation never returns it.
///
/// # Example
///
/// ```
/// use result_engine::error::EngineError;
///
/// let error = EngineError::UnknownExamType {
///     value: "Weekly Quiz".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown exam type: Weekly Quiz");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is not internally consistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// The exam type is not one of the configured exam types.
    #[error("Unknown exam type: {value}")]
    UnknownExamType {
        /// The unrecognized exam type string.
        value: String,
    },

    /// A mark fell outside the range allowed for its exam type.
    #[error("{component} mark {value} is outside the allowed range 0-{max}")]
    MarkOutOfRange {
        /// Which component was out of range ("theory", "practical", "total", "score").
        component: String,
        /// The offending value.
        value: Decimal,
        /// The maximum allowed value.
        max: Decimal,
    },

    /// A mark record could not be graded.
    #[error("Invalid record for roll number '{roll_no}': {message}")]
    InvalidRecord {
        /// The roll number of the record.
        roll_no: String,
        /// A description of what made the record invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
