//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] returned when a string is not a valid money amount.
//! - [`InvalidTimestamp`] returned when a transaction carries no usable
//!   timestamp.
//! - [`InvalidKind`] returned for a transaction type other than income or
//!   expense.
//! - [`UnknownCategory`] returned for a label outside the client enumeration.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidTimestamp`]: EngineError::InvalidTimestamp
//!  [`InvalidKind`]: EngineError::InvalidKind
//!  [`UnknownCategory`]: EngineError::UnknownCategory
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
