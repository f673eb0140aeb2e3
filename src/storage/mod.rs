//! Relational storage
//!
//! The persistence gateway, its connection seam, and the backends behind it.

pub mod connection;
pub mod gateway;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod results;
pub mod schema;
pub mod sqlite;
pub mod value;

pub use connection::{Connection, Connector};
pub use gateway::Gateway;
pub use results::ExecuteOutcome;
pub use schema::Dialect;
pub use sqlite::SqliteConnector;
pub use value::{Row, Value};
