//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// missing records, stock shortfalls, conflicts). File/CSV concerns belong
/// to the interchange layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input, duplicate code).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced product, column, or slot entry is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A withdrawal asked for more cases than the slot holds.
    #[error("insufficient stock: requested {requested} cases, {available} available")]
    InsufficientStock { requested: u32, available: u32 },

    /// The operation would strand downstream state (e.g. deleting a product
    /// that still has cases on the shelf).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient_stock(requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
