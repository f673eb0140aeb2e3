//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

use crate::config::LoggingConfig;

/// Setup logging for the application.
///
/// `RUST_LOG` wins over the configured level when both are present.
pub fn setup_logging(config: &LoggingConfig) {
    env_logger::Builder::from_env(Env::default().default_filter_or(config.level.as_str()))
        .init();
}
