//! Module `model`
//!
//! Defines the `Account` record and its `Role`. Fields are private; every
//! mutation goes through a validating setter.

use std::fmt;
use std::str::FromStr;

use crate::auth::hasher;
use crate::error::ValidationError;

/// Shortest secret `set_secret` accepts, in characters.
pub const MIN_SECRET_LEN: usize = 4;

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Student,
    Teacher,
    Staff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Staff];

    /// Name as stored in the `tipo` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Staff => "Staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against the three role names.
impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidRole(s.to_string()))
    }
}

/// A library user as held in memory between loads.
///
/// `id` is `None` until the record has been inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: Option<i64>,
    name: String,
    role: Role,
    email: String,
    credential_digest: String,
}

impl Account {
    /// Build an unsaved account, hashing `secret` right away.
    ///
    /// An empty secret leaves the digest empty, which never authenticates.
    pub fn new(name: &str, role: Role, email: &str, secret: &str) -> Self {
        let credential_digest = if secret.is_empty() {
            String::new()
        } else {
            hasher::hash(secret)
        };

        Self {
            id: None,
            name: name.to_string(),
            role,
            email: email.to_string(),
            credential_digest,
        }
    }

    /// Rebuild an account loaded from the store, keeping its digest as is.
    pub fn from_stored(
        id: i64,
        name: String,
        role: Role,
        email: String,
        credential_digest: String,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            role,
            email,
            credential_digest,
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn credential_digest(&self) -> &str {
        &self.credential_digest
    }

    /// Whether a secret has ever been set.
    pub fn has_credential(&self) -> bool {
        !self.credential_digest.is_empty()
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Sets the display name, trimmed. Blank names are rejected.
    pub fn set_name(&mut self, value: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    /// Sets the role from its exact name.
    pub fn set_role(&mut self, value: &str) -> Result<(), ValidationError> {
        self.role = value.parse()?;
        Ok(())
    }

    /// Replaces the stored digest with the hash of a new secret.
    pub fn set_secret(&mut self, secret: &str) -> Result<(), ValidationError> {
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(ValidationError::SecretTooShort {
                min: MIN_SECRET_LEN,
            });
        }
        self.credential_digest = hasher::hash(secret);
        Ok(())
    }

    /// Records the id the store assigned on insert.
    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn verify_secret(&self, secret: &str) -> bool {
        hasher::verify(secret, &self.credential_digest)
    }
}
