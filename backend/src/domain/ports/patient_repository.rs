//! Port abstraction for patient persistence adapters.
//!
//! Reads return [`PatientRecord`] values so callers get the hospital and
//! department names alongside each patient. Listings are ordered by patient
//! id.
use async_trait::async_trait;

use crate::domain::{
    DepartmentId, EntityName, HospitalId, NewPatient, Patient, PatientId, PatientRecord, UserId,
};

use super::RepositoryError;

/// Storage for patient records.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Insert a patient.
    ///
    /// Fails with [`RepositoryError::MissingReference`] when the owner,
    /// hospital, or department vanished before the write.
    async fn create(&self, patient: &NewPatient) -> Result<PatientRecord, RepositoryError>;

    /// Fetch a patient by identifier.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<PatientRecord>, RepositoryError>;

    /// Fetch a patient by exact name.
    async fn find_by_name(&self, name: &EntityName) -> Result<Option<Patient>, RepositoryError>;

    /// Patients owned by `owner`.
    async fn list_for_user(&self, owner: UserId) -> Result<Vec<PatientRecord>, RepositoryError>;

    /// Patients of `owner` admitted to `hospital`.
    async fn list_for_hospital(
        &self,
        hospital: HospitalId,
        owner: UserId,
    ) -> Result<Vec<PatientRecord>, RepositoryError>;

    /// Patients of `owner` managed by `department`.
    async fn list_for_department(
        &self,
        department: DepartmentId,
        owner: UserId,
    ) -> Result<Vec<PatientRecord>, RepositoryError>;

    /// Overwrite the stored fields; `None` when the row no longer exists.
    async fn update(&self, patient: &Patient) -> Result<Option<PatientRecord>, RepositoryError>;

    /// Remove a patient; `false` when no row matched.
    async fn delete(&self, id: PatientId) -> Result<bool, RepositoryError>;
}
