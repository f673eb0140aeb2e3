//! Library accounts
//!
//! The account record and its persistence operations.

pub mod model;
pub mod operations;

pub use model::{Account, MIN_SECRET_LEN, Role};
pub use operations::{find_by_email, find_by_id, list_all, save};
