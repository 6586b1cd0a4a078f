//! Error types for the shared infrastructure
//!
//! Failures raised while configuring, connecting to or migrating the
//! relational store.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error raised by database setup and maintenance operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Could not open a connection pool
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query failed
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Applying schema migrations failed
    #[error("Database migration error: {0}")]
    Migration(String),

    /// The connection settings are unusable
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
