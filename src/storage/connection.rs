//! Connection seam between the gateway and a concrete store client.

use crate::error::PersistenceError;
use crate::storage::schema::Dialect;
use crate::storage::value::{Row, Value};

/// A live connection to the store.
///
/// Statements use `?N` placeholders. Every statement runs in autocommit mode,
/// so a successful call is already committed.
pub trait Connection {
    /// Run a statement and collect every row it yields.
    fn query(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>, PersistenceError>;

    /// Run a statement and return the number of rows it changed.
    fn execute(&mut self, statement: &str, params: &[Value]) -> Result<u64, PersistenceError>;

    fn is_connected(&self) -> bool;

    fn close(self: Box<Self>) -> Result<(), PersistenceError>;
}

/// Opens connections for a gateway.
pub trait Connector {
    fn connect(&self) -> Result<Box<dyn Connection>, PersistenceError>;

    fn dialect(&self) -> Dialect;

    /// Human readable target for logs. Must not include credentials.
    fn target(&self) -> String;
}
