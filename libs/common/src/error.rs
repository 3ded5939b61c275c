//! Custom error types for the common library
//!
//! This module defines the database error type shared by every persistence
//! adapter in the workspace.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
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
    /// Whether the failure was a unique constraint violation reported by the store
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Query(SqlxError::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        let err = DatabaseError::Query(SqlxError::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(err.to_string().starts_with("Database query error"));
    }

    #[test]
    fn test_configuration_message() {
        let err = DatabaseError::Configuration("bad url".to_string());
        assert_eq!(err.to_string(), "Database configuration error: bad url");
    }
}
