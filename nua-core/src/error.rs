//! Error types for nua.

use thiserror::Error;

/// Rejected user input. No state is mutated when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A date is required")]
    MissingDate,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Cycle length must be a whole number, got '{0}'")]
    InvalidCycleLength(String),

    #[error("Cycle length must be between 21 and 35 days, got {0}")]
    CycleLengthOutOfRange(u32),

    #[error("A title is required")]
    MissingTitle,

    #[error("Unknown event type '{0}'. Expected period, appointment or medication")]
    UnknownEventType(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),
}

/// Errors that can occur in nua operations.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for nua operations.
pub type CycleResult<T> = Result<T, CycleError>;
