//! Book persistence operations
//!
//! Same upsert-by-id contract as accounts, against `libros`.

use log::info;

use crate::books::model::Book;
use crate::error::PersistenceError;
use crate::storage::{Gateway, Row, Value};

const TABLE: &str = "libros";

const SELECT_BOOK: &str = "SELECT id, titulo, autor, anio, disponible FROM libros";

pub fn save(gateway: &mut Gateway, book: &mut Book) -> Result<(), PersistenceError> {
    match book.id() {
        None => {
            let rows = gateway.fetch_all(
                "INSERT INTO libros (titulo, autor, anio, disponible) \
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
                &[
                    Value::from(book.title()),
                    Value::from(book.author()),
                    Value::from(book.year()),
                    Value::from(book.is_available()),
                ],
            )?;
            let id = rows
                .first()
                .ok_or_else(|| PersistenceError::Decode("insert returned no id".into()))?
                .get_i64(0)?;
            book.set_id(id);
            info!("Book {} created", id);
        }
        Some(id) => {
            let changed = gateway
                .execute(
                    "UPDATE libros SET titulo = ?1, autor = ?2, anio = ?3, disponible = ?4 \
                     WHERE id = ?5",
                    &[
                        Value::from(book.title()),
                        Value::from(book.author()),
                        Value::from(book.year()),
                        Value::from(book.is_available()),
                        Value::from(id),
                    ],
                    false,
                )?
                .rows_affected();
            if changed == 0 {
                return Err(PersistenceError::RowNotFound { table: TABLE, id });
            }
            info!("Book {} updated", id);
        }
    }
    Ok(())
}

pub fn find_by_id(gateway: &mut Gateway, id: i64) -> Result<Option<Book>, PersistenceError> {
    let rows = gateway.fetch_all(&format!("{} WHERE id = ?1", SELECT_BOOK), &[Value::from(id)])?;
    rows.first().map(book_from_row).transpose()
}

/// Every book, ordered by id.
pub fn list_all(gateway: &mut Gateway) -> Result<Vec<Book>, PersistenceError> {
    gateway
        .fetch_all(&format!("{} ORDER BY id", SELECT_BOOK), &[])?
        .iter()
        .map(book_from_row)
        .collect()
}

fn book_from_row(row: &Row) -> Result<Book, PersistenceError> {
    Ok(Book::from_stored(
        row.get_i64(0)?,
        row.get_str(1)?.to_string(),
        row.get_str(2)?.to_string(),
        row.get_i64(3)?,
        row.get_bool(4)?,
    ))
}
