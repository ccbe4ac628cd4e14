//! Error taxonomy for the domain operation boundary.
//!
//! Validation failures are caught before any store call is made; store
//! failures carry the backing storage error verbatim. The REST layer maps
//! the two variants to client-error and server-error status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
