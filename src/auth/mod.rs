//! Authentication system
//!
//! Handles credential hashing, account registration and login checks.

pub mod hasher;
pub mod results;
pub mod service;

pub use results::RegisterOutcome;
pub use service::{authenticate, register};
