//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a targeted record does not exist or is owned
//!   by someone else.
//! - [`InvalidField`] thrown when a request misses a field or carries a value
//!   outside the accepted range. Always raised before touching the database.
//! - [`Database`] wraps every failure reported by the store.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Holds the resource label, e.g. `"Expense"`.
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error("{0}")]
    InvalidField(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
