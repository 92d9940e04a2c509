//! Port for one-way credential hashing.
//!
//! Hashing is CPU-bound and synchronous; callers on async executors may run it
//! inline for the small request volumes this service sees.

use crate::domain::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a credential hash.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "credential hashing failed: {message}",
    }
}

/// One-way hashing of plaintext passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<CredentialHash, PasswordHashError>;

    /// Check `password` against a stored hash. Malformed hashes never verify.
    fn verify(&self, password: &str, hash: &CredentialHash) -> bool;
}
