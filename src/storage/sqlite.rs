//! SQLite backend built on `rusqlite`.

use log::debug;
use rusqlite::params_from_iter;
use std::path::PathBuf;

use crate::error::PersistenceError;
use crate::storage::connection::{Connection, Connector};
use crate::storage::schema::Dialect;
use crate::storage::value::{Row, Value};

/// Opens connections to a SQLite database file.
pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Connector for SqliteConnector {
    fn connect(&self) -> Result<Box<dyn Connection>, PersistenceError> {
        let conn = rusqlite::Connection::open(&self.path)
            .map_err(|e| PersistenceError::ConnectFailed(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| PersistenceError::ConnectFailed(e.to_string()))?;
        Ok(Box::new(SqliteConnection { conn }))
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn target(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl Connection for SqliteConnection {
    fn query(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>, PersistenceError> {
        debug!("sqlite query: {}", statement);
        let mut stmt = self.conn.prepare(statement)?;
        let column_count = stmt.column_count();
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..column_count)
                    .map(|idx| row.get::<_, Value>(idx))
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map(Row::new)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn execute(&mut self, statement: &str, params: &[Value]) -> Result<u64, PersistenceError> {
        debug!("sqlite execute: {}", statement);
        let changed = self.conn.execute(statement, params_from_iter(params.iter()))?;
        Ok(changed as u64)
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn close(self: Box<Self>) -> Result<(), PersistenceError> {
        self.conn
            .close()
            .map_err(|(_, e)| PersistenceError::Statement(e.to_string()))
    }
}
