//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Backends never retry; every failure is returned to the caller immediately
/// with the failing operation's name and the driver cause attached.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not establish, or lost, the backing connection.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A single operation's statement failed.
    #[error("{operation} failed: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Wraps a driver error with the failing operation's name.
    pub(crate) fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Query { operation, source }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
