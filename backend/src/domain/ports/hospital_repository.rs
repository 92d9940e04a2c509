//! Port abstraction for hospital persistence adapters.
use async_trait::async_trait;

use crate::domain::{EntityName, Hospital, HospitalId, NewHospital};

use super::RepositoryError;

/// Storage for hospital reference data.
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    /// Insert a hospital and return it with its assigned id.
    async fn create(&self, hospital: &NewHospital) -> Result<Hospital, RepositoryError>;

    /// Fetch a hospital by identifier.
    async fn find_by_id(&self, id: HospitalId) -> Result<Option<Hospital>, RepositoryError>;

    /// Fetch a hospital by exact name.
    async fn find_by_name(&self, name: &EntityName) -> Result<Option<Hospital>, RepositoryError>;

    /// All hospitals ordered by id.
    async fn list(&self) -> Result<Vec<Hospital>, RepositoryError>;

    /// Overwrite the stored fields; `None` when the row no longer exists.
    async fn update(&self, hospital: &Hospital) -> Result<Option<Hospital>, RepositoryError>;

    /// Remove a hospital and its patients; `false` when no row matched.
    async fn delete(&self, id: HospitalId) -> Result<bool, RepositoryError>;
}
