//! Custom error types for the common library
//!
//! This module defines the storage error taxonomy shared by every
//! repository: callers only ever need to distinguish "no rows", unique
//! violations and timeouts from everything else.

use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A lookup matched nothing or a write affected zero rows
    #[error("no rows")]
    NoRows,

    /// A unique index rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The per-query deadline expired
    #[error("database query timed out after {0:?}")]
    Timeout(Duration),

    /// A partial update was requested with nothing to set
    #[error("no fields to update")]
    EmptyUpdate,

    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a driver error returned by a query
    pub fn from_query(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => DatabaseError::NoRows,
            SqlxError::Database(ref db_err) if db_err.is_unique_violation() => {
                DatabaseError::UniqueViolation(
                    db_err
                        .constraint()
                        .map(str::to_string)
                        .unwrap_or_else(|| db_err.message().to_string()),
                )
            }
            other => DatabaseError::Query(other),
        }
    }

    /// Returns true when the error is the distinguished "no rows" signal
    pub fn is_no_rows(&self) -> bool {
        matches!(self, DatabaseError::NoRows)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_becomes_no_rows() {
        let err = DatabaseError::from_query(SqlxError::RowNotFound);
        assert!(err.is_no_rows());
    }

    #[test]
    fn other_driver_errors_stay_query_errors() {
        let err = DatabaseError::from_query(SqlxError::PoolTimedOut);
        assert!(matches!(err, DatabaseError::Query(SqlxError::PoolTimedOut)));
        assert!(!err.is_no_rows());
    }

    #[test]
    fn timeout_message_names_the_deadline() {
        let err = DatabaseError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "database query timed out after 5s");
    }
}
