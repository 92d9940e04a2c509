//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service.

use std::fmt;

use zeroize::Zeroizing;

use super::Error;

/// Domain error returned when login or signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Password was missing or empty.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Client-facing message for incomplete login or signup payloads.
pub const CREDENTIALS_REQUIRED_MESSAGE: &str = "Name and password are required";

impl From<CredentialsValidationError> for Error {
    fn from(_: CredentialsValidationError) -> Self {
        Self::invalid_request(CREDENTIALS_REQUIRED_MESSAGE)
    }
}

/// Validated name/password pair used for login and signup.
///
/// ## Invariants
/// - `name` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but retains caller-provided whitespace.
///   It is zeroed when dropped.
///
/// # Examples
/// ```
/// use registry_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(Some(" Ann "), Some("x")).unwrap();
/// assert_eq!(creds.name(), "Ann");
/// assert_eq!(creds.password(), "x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    name: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw, possibly missing, inputs.
    pub fn try_from_parts(
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = name.map(str::trim).unwrap_or_default();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }

        let password = password.unwrap_or_default();
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            name: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Name used for user lookups.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
