//! Error types
//!
//! Defines domain-specific error types for each layer of the library system.

use std::fmt;
use std::io;

/// Rejected mutation of an account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    InvalidRole(String),
    SecretTooShort { min: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Name cannot be empty"),
            ValidationError::InvalidRole(r) => write!(
                f,
                "Invalid role '{}'. Must be one of: Student, Teacher, Staff",
                r
            ),
            ValidationError::SecretTooShort { min } => {
                write!(f, "Password must be at least {} characters", min)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Persistence gateway errors
#[derive(Debug)]
pub enum PersistenceError {
    ConnectFailed(String),
    Statement(String),
    ConstraintViolation(String),
    Decode(String),
    RowNotFound { table: &'static str, id: i64 },
    UnsupportedBackend(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::ConnectFailed(e) => write!(f, "Could not connect: {}", e),
            PersistenceError::Statement(e) => write!(f, "Statement failed: {}", e),
            PersistenceError::ConstraintViolation(e) => {
                write!(f, "Constraint violation: {}", e)
            }
            PersistenceError::Decode(e) => write!(f, "Unexpected row shape: {}", e),
            PersistenceError::RowNotFound { table, id } => {
                write!(f, "No row with id {} in {}", id, table)
            }
            PersistenceError::UnsupportedBackend(b) => {
                write!(f, "Backend '{}' is not compiled into this build", b)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(error: rusqlite::Error) -> Self {
        match &error {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                PersistenceError::ConstraintViolation(error.to_string())
            }
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::InvalidColumnIndex(_) => PersistenceError::Decode(error.to_string()),
            _ => PersistenceError::Statement(error.to_string()),
        }
    }
}

#[cfg(feature = "postgres")]
impl From<postgres::Error> for PersistenceError {
    fn from(error: postgres::Error) -> Self {
        if error.code() == Some(&postgres::error::SqlState::UNIQUE_VIOLATION) {
            PersistenceError::ConstraintViolation(error.to_string())
        } else {
            PersistenceError::Statement(error.to_string())
        }
    }
}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum LibraryError {
    Validation(ValidationError),
    Persistence(PersistenceError),
    Config(config::ConfigError),
    Io(io::Error),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Validation(e) => write!(f, "Validation error: {}", e),
            LibraryError::Persistence(e) => write!(f, "Persistence error: {}", e),
            LibraryError::Config(e) => write!(f, "Configuration error: {}", e),
            LibraryError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for LibraryError {}

impl From<ValidationError> for LibraryError {
    fn from(error: ValidationError) -> Self {
        LibraryError::Validation(error)
    }
}

impl From<PersistenceError> for LibraryError {
    fn from(error: PersistenceError) -> Self {
        LibraryError::Persistence(error)
    }
}

impl From<config::ConfigError> for LibraryError {
    fn from(error: config::ConfigError) -> Self {
        LibraryError::Config(error)
    }
}

impl From<io::Error> for LibraryError {
    fn from(error: io::Error) -> Self {
        LibraryError::Io(error)
    }
}
