//! Unique entity names shared by users, patients, hospitals, and departments.
//!
//! Every named entity follows the same two rules: the name must not be blank,
//! and no other row of the same kind may hold exactly the same name. The
//! first rule is checked here; the second needs the store and is enforced by
//! [`ensure_name_available`] before writes (and by unique constraints in the
//! database).

use std::fmt;

use serde::Serialize;

use super::Error;

/// Kind of named entity, used to pick validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Registered account.
    User,
    /// Patient record.
    Patient,
    /// Hospital reference data.
    Hospital,
    /// Department reference data.
    Department,
}

impl EntityKind {
    /// Lower-case label used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Patient => "patient",
            Self::Hospital => "hospital",
            Self::Department => "department",
        }
    }

    /// Message used when an entity of this kind cannot be found.
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::User => "User not found",
            Self::Patient => "Patient not found",
            Self::Hospital => "Hospital not found",
            Self::Department => "Department not found",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation errors for entity names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameValidationError {
    /// Name was missing or blank.
    Empty(EntityKind),
    /// Another entity of the same kind already uses the name.
    Taken(EntityKind),
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(EntityKind::User) => f.write_str("User name cannot be empty."),
            Self::Empty(EntityKind::Patient) => f.write_str("Patient name cannot be empty."),
            Self::Empty(kind) => write!(f, "Invalid {kind} name."),
            Self::Taken(kind) => write!(f, "This {kind} name is already in use."),
        }
    }
}

impl std::error::Error for NameValidationError {}

impl From<NameValidationError> for Error {
    fn from(value: NameValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Non-blank entity name.
///
/// The name is stored exactly as supplied; uniqueness comparisons are
/// case-sensitive and byte-exact.
///
/// # Examples
/// ```
/// use registry_backend::domain::{EntityKind, EntityName};
///
/// let name = EntityName::parse(EntityKind::Hospital, "Rush University Medical Center").unwrap();
/// assert_eq!(name.as_ref(), "Rush University Medical Center");
/// assert!(EntityName::parse(EntityKind::Hospital, "  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Validate a raw name for the given entity kind.
    pub fn parse(kind: EntityKind, raw: impl Into<String>) -> Result<Self, NameValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(NameValidationError::Empty(kind));
        }
        Ok(Self(raw))
    }

    /// Validate an optional name, treating `None` as blank.
    pub fn parse_required(
        kind: EntityKind,
        raw: Option<String>,
    ) -> Result<Self, NameValidationError> {
        Self::parse(kind, raw.unwrap_or_default())
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EntityName> for String {
    fn from(value: EntityName) -> Self {
        value.0
    }
}

/// Reject a name held by a different entity of the same kind.
///
/// `holder` is the id of the entity currently holding the name (if any) and
/// `current` the id of the entity being written (`None` on create). Renaming
/// an entity to its own name is allowed.
pub fn ensure_name_available<I: PartialEq>(
    kind: EntityKind,
    holder: Option<I>,
    current: Option<I>,
) -> Result<(), NameValidationError> {
    match (holder, current) {
        (Some(holder), Some(current)) if holder == current => Ok(()),
        (Some(_), _) => Err(NameValidationError::Taken(kind)),
        (None, _) => Ok(()),
    }
}
