//! Error handling
//!
//! Defines error types and handling for the library system.

pub mod handlers;
pub mod types;

pub use types::*;
