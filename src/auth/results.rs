//! Authentication result types
//!
//! Defines result structures returned by authentication operations.

use crate::accounts::Account;

/// Result of a registration attempt that reached the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Account persisted; carries its assigned id
    Registered(Account),
    /// Another account already uses this email
    DuplicateEmail,
}

impl RegisterOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, RegisterOutcome::Registered(_))
    }
}
