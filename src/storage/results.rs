//! Storage result types
//!
//! Defines result structures returned by gateway operations.

use crate::storage::value::Row;

/// Outcome of a successful `Gateway::execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteOutcome {
    /// Every row the statement produced, in store order
    Rows(Vec<Row>),
    /// Statement committed; number of rows it changed
    Committed(u64),
}

impl ExecuteOutcome {
    /// Rows of a fetch, or nothing for a committed write.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            ExecuteOutcome::Rows(rows) => rows,
            ExecuteOutcome::Committed(_) => Vec::new(),
        }
    }

    pub fn rows_affected(&self) -> u64 {
        match self {
            ExecuteOutcome::Rows(rows) => rows.len() as u64,
            ExecuteOutcome::Committed(n) => *n,
        }
    }
}
