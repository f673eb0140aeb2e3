//! PostgreSQL backend built on the synchronous `postgres` client.

use log::debug;
use postgres::types::{ToSql, Type};
use postgres::{Client, NoTls};

use crate::config::DatabaseConfig;
use crate::error::PersistenceError;
use crate::storage::connection::{Connection, Connector};
use crate::storage::schema::Dialect;
use crate::storage::value::{Row, Value};

/// Opens connections to a PostgreSQL server.
pub struct PostgresConnector {
    config: postgres::Config,
    target: String,
}

impl PostgresConnector {
    pub fn new(db: &DatabaseConfig) -> Self {
        let mut config = postgres::Config::new();
        config
            .host(&db.host)
            .port(db.port)
            .user(&db.user)
            .password(&db.password)
            .dbname(&db.database);

        Self {
            config,
            target: format!("postgres://{}@{}:{}/{}", db.user, db.host, db.port, db.database),
        }
    }
}

impl Connector for PostgresConnector {
    fn connect(&self) -> Result<Box<dyn Connection>, PersistenceError> {
        let client = self
            .config
            .connect(NoTls)
            .map_err(|e| PersistenceError::ConnectFailed(e.to_string()))?;
        Ok(Box::new(PostgresConnection { client }))
    }

    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn target(&self) -> String {
        self.target.clone()
    }
}

struct PostgresConnection {
    client: Client,
}

/// Rewrite `?N` placeholders into PostgreSQL's `$N` form.
///
/// Only a `?` directly followed by a digit is a placeholder; any other `?`
/// is left as written.
fn rewrite_placeholders(statement: &str) -> String {
    let mut out = String::with_capacity(statement.len());
    let mut chars = statement.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('?', Some(next)) if next.is_ascii_digit() => out.push('$'),
            _ => out.push(c),
        }
    }
    out
}

fn bind(params: &[Value]) -> Vec<Box<dyn ToSql + Sync>> {
    params
        .iter()
        .map(|value| -> Box<dyn ToSql + Sync> {
            match value {
                Value::Null => Box::new(Option::<String>::None),
                Value::Integer(i) => Box::new(*i),
                Value::Real(r) => Box::new(*r),
                Value::Text(s) => Box::new(s.clone()),
                Value::Bool(b) => Box::new(*b),
            }
        })
        .collect()
}

fn decode(row: &postgres::Row) -> Result<Row, PersistenceError> {
    let mut values = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        let ty = column.type_();
        let value = if *ty == Type::INT8 {
            row.try_get::<_, Option<i64>>(idx)?.map(Value::Integer)
        } else if *ty == Type::INT4 {
            row.try_get::<_, Option<i32>>(idx)?
                .map(|v| Value::Integer(i64::from(v)))
        } else if *ty == Type::INT2 {
            row.try_get::<_, Option<i16>>(idx)?
                .map(|v| Value::Integer(i64::from(v)))
        } else if *ty == Type::BOOL {
            row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool)
        } else if *ty == Type::FLOAT8 {
            row.try_get::<_, Option<f64>>(idx)?.map(Value::Real)
        } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR {
            row.try_get::<_, Option<String>>(idx)?.map(Value::Text)
        } else {
            return Err(PersistenceError::Decode(format!(
                "unsupported column type {} for {}",
                ty,
                column.name()
            )));
        };
        values.push(value.unwrap_or(Value::Null));
    }
    Ok(Row::new(values))
}

impl Connection for PostgresConnection {
    fn query(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>, PersistenceError> {
        let sql = rewrite_placeholders(statement);
        debug!("postgres query: {}", sql);
        let bound = bind(params);
        let refs: Vec<&(dyn ToSql + Sync)> = bound.iter().map(|b| b.as_ref()).collect();
        self.client
            .query(sql.as_str(), &refs)?
            .iter()
            .map(decode)
            .collect()
    }

    fn execute(&mut self, statement: &str, params: &[Value]) -> Result<u64, PersistenceError> {
        let sql = rewrite_placeholders(statement);
        debug!("postgres execute: {}", sql);
        let bound = bind(params);
        let refs: Vec<&(dyn ToSql + Sync)> = bound.iter().map(|b| b.as_ref()).collect();
        Ok(self.client.execute(sql.as_str(), &refs)?)
    }

    fn is_connected(&self) -> bool {
        !self.client.is_closed()
    }

    fn close(self: Box<Self>) -> Result<(), PersistenceError> {
        Ok(self.client.close()?)
    }
}
