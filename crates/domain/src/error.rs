//! Domain error types

use thiserror::Error;

/// Domain-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A color literal could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
