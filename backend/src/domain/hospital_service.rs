//! Hospital reference-data use-cases.
//!
//! Any authenticated user may change or delete a hospital; there is no
//! per-hospital owner.

use std::sync::Arc;

use tracing::info;

use super::ports::{HospitalRepository, PatientRepository};
use super::{
    EntityKind, EntityName, Error, Hospital, HospitalId, NewHospital, PatientRecord, PhoneNumber,
    UserId, ensure_name_available,
};

/// Raw hospital fields as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalDraft {
    /// Hospital name.
    pub name: Option<String>,
    /// Phone number in any punctuation.
    pub phone_number: Option<String>,
}

/// Hospital with the viewer's patients admitted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalDetail {
    /// The hospital.
    pub hospital: Hospital,
    /// Patients owned by the viewer.
    pub patients: Vec<PatientRecord>,
}

/// Hospital use-cases.
#[derive(Clone)]
pub struct HospitalService {
    hospitals: Arc<dyn HospitalRepository>,
    patients: Arc<dyn PatientRepository>,
}

impl HospitalService {
    /// Build the service from its ports.
    pub fn new(hospitals: Arc<dyn HospitalRepository>, patients: Arc<dyn PatientRepository>) -> Self {
        Self {
            hospitals,
            patients,
        }
    }

    /// Every hospital, ordered by id.
    pub async fn list(&self) -> Result<Vec<Hospital>, Error> {
        Ok(self.hospitals.list().await?)
    }

    /// Add a hospital.
    pub async fn create(&self, draft: HospitalDraft) -> Result<Hospital, Error> {
        let name = EntityName::parse_required(EntityKind::Hospital, draft.name)?;
        self.ensure_name_free(&name, None).await?;
        let phone_number = PhoneNumber::parse(draft.phone_number.as_deref().unwrap_or_default())?;
        let hospital = self
            .hospitals
            .create(&NewHospital { name, phone_number })
            .await?;
        info!(hospital_id = %hospital.id(), "hospital created");
        Ok(hospital)
    }

    /// A hospital with the patients `viewer` has there.
    pub async fn get(&self, viewer: UserId, id: HospitalId) -> Result<HospitalDetail, Error> {
        let hospital = self.load(id).await?;
        let patients = self.patients.list_for_hospital(id, viewer).await?;
        Ok(HospitalDetail { hospital, patients })
    }

    /// Apply the supplied fields.
    pub async fn update(
        &self,
        actor: UserId,
        id: HospitalId,
        draft: HospitalDraft,
    ) -> Result<Hospital, Error> {
        let mut hospital = self.load(id).await?;
        if let Some(raw_name) = draft.name {
            let name = EntityName::parse(EntityKind::Hospital, raw_name)?;
            self.ensure_name_free(&name, Some(id)).await?;
            hospital.rename(name);
        }
        if let Some(raw_phone) = draft.phone_number {
            hospital.set_phone_number(PhoneNumber::parse(&raw_phone)?);
        }
        let updated = self
            .hospitals
            .update(&hospital)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Hospital.not_found_message()))?;
        info!(hospital_id = %id, user_id = %actor, "hospital updated");
        Ok(updated)
    }

    /// Delete a hospital and every patient admitted to it.
    pub async fn delete(&self, actor: UserId, id: HospitalId) -> Result<(), Error> {
        if !self.hospitals.delete(id).await? {
            return Err(Error::not_found(EntityKind::Hospital.not_found_message()));
        }
        info!(hospital_id = %id, user_id = %actor, "hospital deleted");
        Ok(())
    }

    async fn load(&self, id: HospitalId) -> Result<Hospital, Error> {
        self.hospitals
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Hospital.not_found_message()))
    }

    async fn ensure_name_free(
        &self,
        name: &EntityName,
        current: Option<HospitalId>,
    ) -> Result<(), Error> {
        let holder = self.hospitals.find_by_name(name).await?.map(|h| h.id());
        ensure_name_available(EntityKind::Hospital, holder, current)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::Registry;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> Registry {
        Registry::in_memory()
    }

    fn draft(name: &str, phone: &str) -> HospitalDraft {
        HospitalDraft {
            name: Some(name.to_owned()),
            phone_number: Some(phone.to_owned()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_cleaned_phone_digits(registry: Registry) {
        let hospital = registry
            .hospitals
            .create(draft("Evanston Hospital", "(847) 570-2000"))
            .await
            .expect("hospital created");
        assert_eq!(hospital.phone_number().as_ref(), "8475702000");
    }

    #[rstest]
    #[case(draft("", "8475702000"), "Invalid hospital name.")]
    #[case(draft("Evanston Hospital", ""), "Phone number cannot be empty.")]
    #[case(draft("Evanston Hospital", "847-570"), "Phone number must contain 10 digits.")]
    #[case(HospitalDraft::default(), "Invalid hospital name.")]
    #[tokio::test]
    async fn create_rejects_invalid_fields(
        registry: Registry,
        #[case] draft: HospitalDraft,
        #[case] message: &str,
    ) {
        let err = registry.hospitals.create(draft).await.expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_names_are_rejected(registry: Registry) {
        let hospitals = &registry.hospitals;
        hospitals
            .create(draft("Evanston Hospital", "8475702000"))
            .await
            .expect("first create");
        let err = hospitals
            .create(draft("Evanston Hospital", "3129262000"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.message(), "This hospital name is already in use.");
    }

    #[rstest]
    #[tokio::test]
    async fn renaming_to_own_name_is_allowed(registry: Registry) {
        let hospitals = &registry.hospitals;
        let created = hospitals
            .create(draft("Evanston Hospital", "8475702000"))
            .await
            .expect("created");
        let updated = hospitals
            .update(
                UserId::new(1),
                created.id(),
                HospitalDraft {
                    name: Some("Evanston Hospital".to_owned()),
                    phone_number: None,
                },
            )
            .await
            .expect("self rename");
        assert_eq!(updated, created);
    }

    #[rstest]
    #[tokio::test]
    async fn update_changes_only_supplied_fields(registry: Registry) {
        let hospitals = &registry.hospitals;
        let created = hospitals
            .create(draft("Evanston Hospital", "8475702000"))
            .await
            .expect("created");
        let updated = hospitals
            .update(
                UserId::new(1),
                created.id(),
                HospitalDraft {
                    name: None,
                    phone_number: Some("312.926.2000".to_owned()),
                },
            )
            .await
            .expect("updated");
        assert_eq!(updated.name(), created.name());
        assert_eq!(updated.phone_number().as_ref(), "3129262000");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_hospital_reports_not_found(registry: Registry) {
        let err = registry
            .hospitals
            .get(UserId::new(1), HospitalId::new(99))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Hospital not found");

        let err = registry
            .hospitals
            .delete(UserId::new(1), HospitalId::new(99))
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
