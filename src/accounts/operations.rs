//! Account persistence operations
//!
//! Upsert and lookups against the `usuarios` table.

use log::{debug, info, warn};

use crate::accounts::model::{Account, Role};
use crate::error::PersistenceError;
use crate::storage::{Gateway, Row, Value};

const TABLE: &str = "usuarios";

const SELECT_ACCOUNT: &str = "SELECT id, nombre, tipo, email, contrasena_hash FROM usuarios";

/// Inserts the account when it has no id, updates it otherwise.
///
/// On insert the store-assigned id is written back into `account`.
pub fn save(gateway: &mut Gateway, account: &mut Account) -> Result<(), PersistenceError> {
    match account.id() {
        None => {
            let rows = gateway.fetch_all(
                "INSERT INTO usuarios (nombre, tipo, email, contrasena_hash) \
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
                &[
                    Value::from(account.name()),
                    Value::from(account.role().as_str()),
                    Value::from(account.email()),
                    Value::from(account.credential_digest()),
                ],
            )?;
            let id = rows
                .first()
                .ok_or_else(|| PersistenceError::Decode("insert returned no id".into()))?
                .get_i64(0)?;
            account.set_id(id);
            info!("Account {} created", id);
        }
        Some(id) => {
            let changed = gateway
                .execute(
                    "UPDATE usuarios SET nombre = ?1, tipo = ?2, email = ?3, contrasena_hash = ?4 \
                     WHERE id = ?5",
                    &[
                        Value::from(account.name()),
                        Value::from(account.role().as_str()),
                        Value::from(account.email()),
                        Value::from(account.credential_digest()),
                        Value::from(id),
                    ],
                    false,
                )?
                .rows_affected();
            if changed == 0 {
                return Err(PersistenceError::RowNotFound { table: TABLE, id });
            }
            info!("Account {} updated", id);
        }
    }
    Ok(())
}

pub fn find_by_id(gateway: &mut Gateway, id: i64) -> Result<Option<Account>, PersistenceError> {
    let rows = gateway.fetch_all(
        &format!("{} WHERE id = ?1", SELECT_ACCOUNT),
        &[Value::from(id)],
    )?;
    rows.first().map(account_from_row).transpose()
}

pub fn find_by_email(
    gateway: &mut Gateway,
    email: &str,
) -> Result<Option<Account>, PersistenceError> {
    let rows = gateway.fetch_all(
        &format!("{} WHERE email = ?1", SELECT_ACCOUNT),
        &[Value::from(email)],
    )?;
    debug!("Email lookup matched {} row(s)", rows.len());
    rows.first().map(account_from_row).transpose()
}

/// Every account, ordered by id.
///
/// Rows that cannot be decoded (e.g. a `tipo` outside the known roles) are
/// logged and left out rather than failing the whole listing.
pub fn list_all(gateway: &mut Gateway) -> Result<Vec<Account>, PersistenceError> {
    let rows = gateway.fetch_all(&format!("{} ORDER BY id", SELECT_ACCOUNT), &[])?;
    let mut accounts = Vec::with_capacity(rows.len());
    for row in &rows {
        match account_from_row(row) {
            Ok(account) => accounts.push(account),
            Err(e) => warn!("Skipping unreadable account row: {}", e),
        }
    }
    Ok(accounts)
}

fn account_from_row(row: &Row) -> Result<Account, PersistenceError> {
    let role: Role = row
        .get_str(2)?
        .parse()
        .map_err(|e| PersistenceError::Decode(format!("{}", e)))?;

    Ok(Account::from_stored(
        row.get_i64(0)?,
        row.get_str(1)?.to_string(),
        role,
        row.get_str(3)?.to_string(),
        row.get_str(4)?.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteConnector;
    use tempfile::TempDir;

    fn test_gateway() -> (TempDir, Gateway) {
        let tmp = TempDir::new().unwrap();
        let gateway = Gateway::new(Box::new(SqliteConnector::new(tmp.path().join("library.db"))));
        (tmp, gateway)
    }

    #[test]
    fn insert_then_fetch_round_trips() {
        let (_tmp, mut gateway) = test_gateway();
        let mut account = Account::new("Ana", Role::Student, "ana@x.com", "1234");
        save(&mut gateway, &mut account).unwrap();
        let id = account.id().expect("id assigned on insert");

        let loaded = find_by_id(&mut gateway, id).unwrap().unwrap();
        assert_eq!(loaded.name(), "Ana");
        assert_eq!(loaded.role(), Role::Student);
        assert_eq!(loaded.email(), "ana@x.com");
        assert!(loaded.verify_secret("1234"));
        assert_eq!(loaded, account);
    }

    #[test]
    fn role_change_is_visible_after_update() {
        let (_tmp, mut gateway) = test_gateway();
        let mut account = Account::new("Ana", Role::Student, "ana@x.com", "1234");
        save(&mut gateway, &mut account).unwrap();

        account.set_role("Teacher").unwrap();
        save(&mut gateway, &mut account).unwrap();

        let loaded = find_by_email(&mut gateway, "ana@x.com").unwrap().unwrap();
        assert_eq!(loaded.role(), Role::Teacher);
        assert_eq!(loaded.id(), account.id());
    }

    #[test]
    fn missing_rows_are_none_not_errors() {
        let (_tmp, mut gateway) = test_gateway();
        assert!(find_by_id(&mut gateway, 42).unwrap().is_none());
        assert!(find_by_email(&mut gateway, "nobody@x.com").unwrap().is_none());
        assert!(list_all(&mut gateway).unwrap().is_empty());
    }

    #[test]
    fn updating_unknown_id_reports_row_not_found() {
        let (_tmp, mut gateway) = test_gateway();
        let mut ghost = Account::from_stored(
            99,
            "Ghost".into(),
            Role::Staff,
            "ghost@x.com".into(),
            String::new(),
        );
        assert!(matches!(
            save(&mut gateway, &mut ghost),
            Err(PersistenceError::RowNotFound { id: 99, .. })
        ));
    }

    #[test]
    fn list_all_orders_by_id() {
        let (_tmp, mut gateway) = test_gateway();
        for (name, email) in [("Ana", "ana@x.com"), ("Luis", "luis@x.com"), ("Eva", "eva@x.com")] {
            let mut account = Account::new(name, Role::Student, email, "1234");
            save(&mut gateway, &mut account).unwrap();
        }

        let names: Vec<_> = list_all(&mut gateway)
            .unwrap()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, ["Ana", "Luis", "Eva"]);
    }

    #[test]
    fn unknown_stored_role_is_a_decode_error() {
        let (_tmp, mut gateway) = test_gateway();
        gateway
            .execute(
                "INSERT INTO usuarios (nombre, tipo, email, contrasena_hash) VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::from("Old"),
                    Value::from("Estudiante"),
                    Value::from("old@x.com"),
                    Value::from(""),
                ],
                false,
            )
            .unwrap();
        assert!(matches!(
            find_by_email(&mut gateway, "old@x.com"),
            Err(PersistenceError::Decode(_))
        ));
    }

    #[test]
    fn list_all_skips_rows_with_unknown_role() {
        let (_tmp, mut gateway) = test_gateway();
        let mut ana = Account::new("Ana", Role::Student, "ana@x.com", "1234");
        save(&mut gateway, &mut ana).unwrap();
        gateway
            .execute(
                "INSERT INTO usuarios (nombre, tipo, email, contrasena_hash) VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::from("Old"),
                    Value::from("Estudiante"),
                    Value::from("old@x.com"),
                    Value::from(""),
                ],
                false,
            )
            .unwrap();
        let mut luis = Account::new("Luis", Role::Staff, "luis@x.com", "1234");
        save(&mut gateway, &mut luis).unwrap();

        let listed = list_all(&mut gateway).unwrap();
        assert_eq!(listed, vec![ana, luis]);
    }
}
