//! Port abstraction for department persistence adapters.
use async_trait::async_trait;

use crate::domain::{Department, DepartmentId, EntityName, NewDepartment};

use super::RepositoryError;

/// Storage for department reference data.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Insert a department and return it with its assigned id.
    async fn create(&self, department: &NewDepartment) -> Result<Department, RepositoryError>;

    /// Fetch a department by identifier.
    async fn find_by_id(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError>;

    /// Fetch a department by exact name.
    async fn find_by_name(&self, name: &EntityName)
    -> Result<Option<Department>, RepositoryError>;

    /// All departments ordered by id.
    async fn list(&self) -> Result<Vec<Department>, RepositoryError>;

    /// Overwrite the stored name; `None` when the row no longer exists.
    async fn update(&self, department: &Department)
    -> Result<Option<Department>, RepositoryError>;

    /// Remove a department and its patients; `false` when no row matched.
    async fn delete(&self, id: DepartmentId) -> Result<bool, RepositoryError>;
}
