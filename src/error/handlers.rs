//! Error handlers
//!
//! Logs errors and maps them to the text shown at the console.

use crate::error::types::{LibraryError, PersistenceError};
use log::{error, warn};

/// What the failed request was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// Log a library error at the level its kind deserves.
pub fn handle_error(err: &LibraryError) {
    match err {
        LibraryError::Validation(e) => warn!("Rejected input: {}", e),
        _ => error!("Library error: {}", err),
    }
}

/// Convert an error into the line rendered for the user.
pub fn user_message(err: &LibraryError, operation: Operation) -> String {
    match err {
        LibraryError::Validation(e) => format!("❌ {}", e),
        LibraryError::Persistence(PersistenceError::ConnectFailed(_)) => {
            "❌ The database is unavailable, please try again".to_string()
        }
        LibraryError::Persistence(PersistenceError::ConstraintViolation(_)) => {
            "❌ That record conflicts with an existing one".to_string()
        }
        LibraryError::Persistence(_) => match operation {
            Operation::Write => "❌ The operation could not be saved".to_string(),
            Operation::Read => "❌ The database request failed".to_string(),
        },
        LibraryError::Config(_) => "❌ Invalid configuration".to_string(),
        LibraryError::Io(_) => "❌ Console error".to_string(),
    }
}
