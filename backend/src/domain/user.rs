//! Registered users and their stored credentials.

use std::fmt;

use super::{EntityName, UserId};

/// One-way hash of a user's password.
///
/// The value is opaque to the domain: only a [`PasswordHasher`] can produce or
/// check it. `Debug` output is redacted so hashes never reach logs.
///
/// [`PasswordHasher`]: crate::domain::ports::PasswordHasher
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap an encoded hash produced by a hasher or loaded from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}

/// Application user.
///
/// ## Invariants
/// - `name` is unique across all users (enforced at write time).
/// - `credential` only ever holds a hash, never the plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: EntityName,
    credential: CredentialHash,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, name: EntityName, credential: CredentialHash) -> Self {
        Self {
            id,
            name,
            credential,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique user name.
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// Stored credential hash.
    pub fn credential(&self) -> &CredentialHash {
        &self.credential
    }
}

/// User awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique user name.
    pub name: EntityName,
    /// Hash of the chosen password.
    pub credential: CredentialHash,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityKind;

    #[test]
    fn credential_debug_output_is_redacted() {
        let user = User::new(
            UserId::new(1),
            EntityName::parse(EntityKind::User, "Ann").expect("valid name"),
            CredentialHash::new("$argon2id$v=19$secret"),
        );
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
