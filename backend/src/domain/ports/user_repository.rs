//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{EntityName, NewUser, User, UserId};

use super::RepositoryError;

/// Storage for registered users.
///
/// Deleting a user removes every patient it owns.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id.
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by exact name.
    async fn find_by_name(&self, name: &EntityName) -> Result<Option<User>, RepositoryError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Remove a user; `false` when no row matched.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;
}
