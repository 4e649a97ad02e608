//! Interchange error model.

use thiserror::Error;

use shelftrack_core::DomainError;

/// Result type of the import reconciler.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors surfaced by the CSV import reconciler.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The header row does not match the expected column labels.
    #[error("header mismatch: expected {expected:?}, got {found:?}")]
    HeaderMismatch {
        expected: &'static [&'static str],
        found: Vec<String>,
    },

    /// No row survived filtering.
    #[error("no valid rows: {0}")]
    NoValidRows(String),

    /// The ledger rejected rows that passed file-level filtering.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("csv parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type of the report writers.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors surfaced while rendering a CSV report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
