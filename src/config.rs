//! Configuration management for the library system
//!
//! Settings come from an optional TOML file overlaid by `LIBRARY_*`
//! environment variables. Nothing about the store is hardcoded.

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::fmt;

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_VAR: &str = "LIBRARY_CONFIG";

/// Config file used when `LIBRARY_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Complete application configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Which store the gateway talks to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Postgres,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Sqlite => write!(f, "sqlite"),
            Backend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Connection settings for the relational store
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: Backend,

    /// Server host (PostgreSQL only)
    pub host: String,

    /// Server port (PostgreSQL only)
    pub port: u16,

    pub user: String,
    pub password: String,

    /// SQLite file path, or the PostgreSQL database name
    pub database: String,

    /// Create missing tables on connect
    pub bootstrap_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            host: "localhost".to_string(),
            port: 5432,
            user: String::new(),
            password: String::new(),
            database: "library.db".to_string(),
            bootstrap_schema: true,
        }
    }
}

// Password stays out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("bootstrap_schema", &self.bootstrap_schema)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let builder = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::from_builder(builder)
    }

    /// Build, deserialize and validate from an already assembled builder
    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database.database.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "database.database cannot be empty".into(),
            ));
        }

        if self.database.backend == Backend::Postgres {
            if self.database.host.trim().is_empty() {
                return Err(config::ConfigError::Message(
                    "database.host is required for the postgres backend".into(),
                ));
            }
            if self.database.port == 0 {
                return Err(config::ConfigError::Message(
                    "database.port cannot be 0".into(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Result<AppConfig, config::ConfigError> {
        AppConfig::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn empty_source_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.database.backend, Backend::Sqlite);
        assert_eq!(config.database.database, "library.db");
        assert!(config.database.bootstrap_schema);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn reads_postgres_settings() {
        let config = parse(
            r#"
            [database]
            backend = "postgres"
            host = "db.internal"
            port = 6543
            user = "librarian"
            password = "s3cret"
            database = "biblioteca"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.backend, Backend::Postgres);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.user, "librarian");
        assert_eq!(config.database.database, "biblioteca");
    }

    #[test]
    fn rejects_empty_database_name() {
        let err = parse("[database]\ndatabase = \"  \"").unwrap_err();
        assert!(err.to_string().contains("database.database"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = parse("[database]\npassword = \"hunter2\"").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
