//! Error types for the analytics engine
//!
//! Error taxonomy using thiserror. Empty input is never an error: every
//! operation accepts an empty collection and returns an empty result.

use thiserror::Error;

/// Top-level analytics error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

/// A malformed, missing, or out-of-range field in an input row.
///
/// Carries the 0-based row index so the host can point at the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("row {row}, column '{column}': {reason} (value: {value:?})")]
pub struct ValidationError {
    pub row: usize,
    pub column: String,
    pub value: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: ValidationReason,
    ) -> Self {
        Self {
            row,
            column: column.into(),
            value: value.into(),
            reason,
        }
    }
}

/// Why a field failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    #[error("field is empty")]
    Empty,

    #[error("not a number")]
    NotNumeric,

    #[error("not an integer")]
    NotInteger,

    #[error("negative amount")]
    Negative,

    #[error("amount exceeds {max}")]
    TooLarge { max: u64 },

    #[error("leading or trailing whitespace")]
    Untrimmed,

    #[error("unparsable date")]
    UnparsableDate,

    #[error("year outside {min}..={max}")]
    YearOutOfRange { min: i32, max: i32 },
}

/// A bad parameter passed to an engine operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{parameter}: {reason}")]
pub struct InvalidArgument {
    pub parameter: String,
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
