//! Book catalog
//!
//! The catalog item and its persistence operations. No security logic lives
//! here.

pub mod model;
pub mod operations;

pub use model::Book;
pub use operations::{find_by_id, list_all, save};
