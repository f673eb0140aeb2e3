//! Persistence gateway
//!
//! Owns the single connection of a process run and executes parametrized
//! statements over it, reconnecting when the link has gone away.

use log::{debug, error, info, warn};

use crate::config::{Backend, DatabaseConfig};
use crate::error::PersistenceError;
use crate::storage::connection::{Connection, Connector};
use crate::storage::results::ExecuteOutcome;
use crate::storage::sqlite::SqliteConnector;
use crate::storage::value::{Row, Value};

pub struct Gateway {
    connector: Box<dyn Connector>,
    connection: Option<Box<dyn Connection>>,
    bootstrap_schema: bool,
}

impl Gateway {
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            connection: None,
            bootstrap_schema: true,
        }
    }

    /// Build a gateway for the configured backend. Does not connect yet.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        let connector: Box<dyn Connector> = match config.backend {
            Backend::Sqlite => Box::new(SqliteConnector::new(&config.database)),
            #[cfg(feature = "postgres")]
            Backend::Postgres => Box::new(crate::storage::postgres::PostgresConnector::new(config)),
            #[cfg(not(feature = "postgres"))]
            Backend::Postgres => {
                return Err(PersistenceError::UnsupportedBackend(
                    config.backend.to_string(),
                ));
            }
        };

        let mut gateway = Self::new(connector);
        gateway.bootstrap_schema = config.bootstrap_schema;
        Ok(gateway)
    }

    /// Open the connection if it is not already live.
    pub fn connect(&mut self) -> Result<(), PersistenceError> {
        if self.is_connected() {
            return Ok(());
        }

        // Drop a dead handle before replacing it.
        if let Some(stale) = self.connection.take() {
            let _ = stale.close();
        }

        let target = self.connector.target();
        let mut connection = self.connector.connect().map_err(|e| {
            error!("Failed to connect to {}: {}", target, e);
            e
        })?;

        if self.bootstrap_schema {
            for statement in self.connector.dialect().schema() {
                match connection.execute(statement, &[]) {
                    Ok(_) => {}
                    // Legacy data with repeated emails cannot take the index;
                    // registration still checks emails before inserting.
                    Err(e) if statement.starts_with("CREATE UNIQUE INDEX") => {
                        warn!("Unique email index not created, remove duplicate emails to enable it: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        info!("Connected to {}", target);
        self.connection = Some(connection);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|connection| connection.is_connected())
    }

    /// Close the connection. Safe to call repeatedly or before `connect`.
    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            match connection.close() {
                Ok(()) => info!("Connection to {} closed", self.connector.target()),
                Err(e) => warn!("Error while closing connection: {}", e),
            }
        }
    }

    /// Execute a statement, fetching all rows when `fetch` is set.
    ///
    /// Reconnects first if needed. Store failures come back as `Err`; the
    /// connection is kept for the next call.
    pub fn execute(
        &mut self,
        statement: &str,
        params: &[Value],
        fetch: bool,
    ) -> Result<ExecuteOutcome, PersistenceError> {
        self.connect()?;
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| PersistenceError::ConnectFailed("no live connection".into()))?;

        let result = if fetch {
            connection.query(statement, params).map(ExecuteOutcome::Rows)
        } else {
            connection.execute(statement, params).map(ExecuteOutcome::Committed)
        };

        match &result {
            Ok(outcome) => debug!("Statement touched {} row(s)", outcome.rows_affected()),
            Err(e) => error!("Statement failed: {}", e),
        }
        result
    }

    /// Shorthand for `execute(.., fetch = true)`.
    pub fn fetch_all(
        &mut self,
        statement: &str,
        params: &[Value],
    ) -> Result<Vec<Row>, PersistenceError> {
        self.execute(statement, params, true)
            .map(ExecuteOutcome::into_rows)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.close();
    }
}
