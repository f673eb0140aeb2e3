//! Utility functions
//!
//! Provides logging setup and console input sanitation.

pub mod logging;
pub mod validation;
