//! Authentication service
//!
//! Registers accounts and checks email/secret pairs against the store.

use log::{info, warn};

use crate::accounts::{self, Account, Role};
use crate::auth::results::RegisterOutcome;
use crate::error::{LibraryError, PersistenceError};
use crate::storage::Gateway;

/// Registers a new account.
///
/// Name, role and secret are validated before the store is touched. The email
/// pre-check and the insert are separate statements; a concurrent insert that
/// slips between them trips the unique index and is reported as a duplicate
/// too.
pub fn register(
    gateway: &mut Gateway,
    name: &str,
    role: &str,
    email: &str,
    secret: &str,
) -> Result<RegisterOutcome, LibraryError> {
    let role: Role = role.parse()?;
    let mut account = Account::new(name, role, email, "");
    account.set_name(name)?;
    account.set_secret(secret)?;

    let taken = match accounts::find_by_email(gateway, email) {
        Ok(existing) => existing.is_some(),
        // A row exists even if it cannot be read back.
        Err(PersistenceError::Decode(e)) => {
            warn!("Existing account for {} is unreadable: {}", email, e);
            true
        }
        Err(e) => return Err(e.into()),
    };
    if taken {
        warn!("Registration rejected, email already in use: {}", email);
        return Ok(RegisterOutcome::DuplicateEmail);
    }

    match accounts::save(gateway, &mut account) {
        Ok(()) => {
            info!("Registered account {:?} ({})", account.id(), account.role());
            Ok(RegisterOutcome::Registered(account))
        }
        Err(PersistenceError::ConstraintViolation(e)) => {
            warn!("Registration lost a race on {}: {}", email, e);
            Ok(RegisterOutcome::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

/// Returns the account only when the email exists and the secret verifies.
///
/// Unknown email and wrong secret are both `Ok(None)`; `Err` means the
/// lookup itself failed.
pub fn authenticate(
    gateway: &mut Gateway,
    email: &str,
    secret: &str,
) -> Result<Option<Account>, PersistenceError> {
    match accounts::find_by_email(gateway, email) {
        Ok(Some(account)) if account.verify_secret(secret) => {
            info!("Login succeeded for account {:?}", account.id());
            Ok(Some(account))
        }
        Ok(_) => {
            warn!("Login failed for {}", email);
            Ok(None)
        }
        Err(PersistenceError::Decode(e)) => {
            warn!("Login refused for {}, stored account is unreadable: {}", email, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::storage::{Connection, Connector, Dialect, Row, SqliteConnector, Value};
    use tempfile::TempDir;

    fn test_gateway() -> (TempDir, Gateway) {
        let tmp = TempDir::new().unwrap();
        let gateway = Gateway::new(Box::new(SqliteConnector::new(tmp.path().join("library.db"))));
        (tmp, gateway)
    }

    #[test]
    fn register_then_authenticate() {
        let (_tmp, mut gateway) = test_gateway();

        let outcome = register(&mut gateway, "Ana", "Student", "ana@x.com", "1234").unwrap();
        assert!(outcome.is_registered());

        let again = register(&mut gateway, "Ana Bis", "Teacher", "ana@x.com", "5678").unwrap();
        assert_eq!(again, RegisterOutcome::DuplicateEmail);

        let account = authenticate(&mut gateway, "ana@x.com", "1234")
            .unwrap()
            .expect("valid credentials");
        assert_eq!(account.name(), "Ana");
        assert_eq!(account.role(), Role::Student);

        assert!(authenticate(&mut gateway, "ana@x.com", "wrong").unwrap().is_none());
        assert!(authenticate(&mut gateway, "nobody@x.com", "1234").unwrap().is_none());
    }

    #[test]
    fn invalid_input_is_rejected_before_any_write() {
        let (_tmp, mut gateway) = test_gateway();

        assert!(matches!(
            register(&mut gateway, "  ", "Student", "a@x.com", "1234"),
            Err(LibraryError::Validation(ValidationError::EmptyName))
        ));
        assert!(matches!(
            register(&mut gateway, "Ana", "Invalid", "a@x.com", "1234"),
            Err(LibraryError::Validation(ValidationError::InvalidRole(_)))
        ));
        assert!(matches!(
            register(&mut gateway, "Ana", "Student", "a@x.com", "abc"),
            Err(LibraryError::Validation(ValidationError::SecretTooShort { .. }))
        ));

        assert!(accounts::list_all(&mut gateway).unwrap().is_empty());
    }

    #[test]
    fn registered_name_is_trimmed() {
        let (_tmp, mut gateway) = test_gateway();
        let outcome = register(&mut gateway, "  Luis ", "Staff", "luis@x.com", "abcd").unwrap();
        match outcome {
            RegisterOutcome::Registered(account) => {
                assert_eq!(account.name(), "Luis");
                assert!(account.id().is_some());
            }
            RegisterOutcome::DuplicateEmail => panic!("unexpected duplicate"),
        }
    }

    /// Hides every email lookup so only the unique index can catch a
    /// duplicate, as when two registrations interleave.
    struct BlindEmailConnector(SqliteConnector);

    struct BlindEmailConnection(Box<dyn Connection>);

    impl Connector for BlindEmailConnector {
        fn connect(&self) -> Result<Box<dyn Connection>, PersistenceError> {
            Ok(Box::new(BlindEmailConnection(self.0.connect()?)))
        }

        fn dialect(&self) -> Dialect {
            self.0.dialect()
        }

        fn target(&self) -> String {
            self.0.target()
        }
    }

    impl Connection for BlindEmailConnection {
        fn query(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>, PersistenceError> {
            if statement.starts_with("SELECT") && statement.contains("WHERE email") {
                return Ok(Vec::new());
            }
            self.0.query(statement, params)
        }

        fn execute(&mut self, statement: &str, params: &[Value]) -> Result<u64, PersistenceError> {
            self.0.execute(statement, params)
        }

        fn is_connected(&self) -> bool {
            self.0.is_connected()
        }

        fn close(self: Box<Self>) -> Result<(), PersistenceError> {
            self.0.close()
        }
    }

    #[test]
    fn unique_index_violation_is_reported_as_duplicate() {
        let tmp = TempDir::new().unwrap();
        let connector = BlindEmailConnector(SqliteConnector::new(tmp.path().join("library.db")));
        let mut gateway = Gateway::new(Box::new(connector));

        let first = register(&mut gateway, "Ana", "Student", "ana@x.com", "1234").unwrap();
        assert!(first.is_registered());

        let second = register(&mut gateway, "Ana Bis", "Teacher", "ana@x.com", "5678").unwrap();
        assert_eq!(second, RegisterOutcome::DuplicateEmail);
        assert_eq!(accounts::list_all(&mut gateway).unwrap().len(), 1);
    }

    #[test]
    fn unreadable_stored_account_cannot_log_in_or_be_reregistered() {
        let (_tmp, mut gateway) = test_gateway();
        gateway
            .execute(
                "INSERT INTO usuarios (nombre, tipo, email, contrasena_hash) VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::from("Old"),
                    Value::from("Estudiante"),
                    Value::from("old@x.com"),
                    Value::from(crate::auth::hasher::hash("1234")),
                ],
                false,
            )
            .unwrap();

        assert!(authenticate(&mut gateway, "old@x.com", "1234").unwrap().is_none());
        assert_eq!(
            register(&mut gateway, "Old", "Student", "old@x.com", "1234").unwrap(),
            RegisterOutcome::DuplicateEmail
        );
    }

    #[test]
    fn account_without_credential_cannot_log_in() {
        let (_tmp, mut gateway) = test_gateway();
        let mut account = Account::new("Eva", Role::Teacher, "eva@x.com", "");
        accounts::save(&mut gateway, &mut account).unwrap();

        assert!(authenticate(&mut gateway, "eva@x.com", "").unwrap().is_none());
    }
}
