//! Table definitions issued when a connection is opened.

/// SQL flavour spoken by a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

const SQLITE_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS usuarios (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL,
        tipo TEXT NOT NULL,
        email TEXT NOT NULL,
        contrasena_hash TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS usuarios_email_key ON usuarios (email)",
    "CREATE TABLE IF NOT EXISTS libros (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        titulo TEXT NOT NULL,
        autor TEXT NOT NULL,
        anio INTEGER NOT NULL,
        disponible INTEGER NOT NULL DEFAULT 1
    )",
];

const POSTGRES_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS usuarios (
        id BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL,
        tipo TEXT NOT NULL,
        email TEXT NOT NULL,
        contrasena_hash TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS usuarios_email_key ON usuarios (email)",
    "CREATE TABLE IF NOT EXISTS libros (
        id BIGSERIAL PRIMARY KEY,
        titulo TEXT NOT NULL,
        autor TEXT NOT NULL,
        anio BIGINT NOT NULL,
        disponible BOOLEAN NOT NULL DEFAULT TRUE
    )",
];

impl Dialect {
    /// Idempotent `CREATE ... IF NOT EXISTS` statements for both tables.
    pub fn schema(self) -> &'static [&'static str] {
        match self {
            Dialect::Sqlite => SQLITE_SCHEMA,
            Dialect::Postgres => POSTGRES_SCHEMA,
        }
    }
}
