//! Department reference-data use-cases.

use std::sync::Arc;

use tracing::info;

use super::ports::{DepartmentRepository, PatientRepository};
use super::{
    Department, DepartmentId, EntityKind, EntityName, Error, NewDepartment, PatientRecord, UserId,
    ensure_name_available,
};

/// Raw department fields as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentDraft {
    /// Department name.
    pub name: Option<String>,
}

/// Department with the viewer's patients managed by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentDetail {
    /// The department.
    pub department: Department,
    /// Patients owned by the viewer.
    pub patients: Vec<PatientRecord>,
}

/// Department use-cases. Mutations need an authenticated actor but no
/// ownership.
#[derive(Clone)]
pub struct DepartmentService {
    departments: Arc<dyn DepartmentRepository>,
    patients: Arc<dyn PatientRepository>,
}

impl DepartmentService {
    /// Build the service from its ports.
    pub fn new(
        departments: Arc<dyn DepartmentRepository>,
        patients: Arc<dyn PatientRepository>,
    ) -> Self {
        Self {
            departments,
            patients,
        }
    }

    /// Every department, ordered by id.
    pub async fn list(&self) -> Result<Vec<Department>, Error> {
        Ok(self.departments.list().await?)
    }

    /// Add a department.
    pub async fn create(&self, draft: DepartmentDraft) -> Result<Department, Error> {
        let name = EntityName::parse_required(EntityKind::Department, draft.name)?;
        self.ensure_name_free(&name, None).await?;
        let department = self.departments.create(&NewDepartment { name }).await?;
        info!(department_id = %department.id(), "department created");
        Ok(department)
    }

    /// A department with the patients `viewer` has there.
    pub async fn get(&self, viewer: UserId, id: DepartmentId) -> Result<DepartmentDetail, Error> {
        let department = self.load(id).await?;
        let patients = self.patients.list_for_department(id, viewer).await?;
        Ok(DepartmentDetail {
            department,
            patients,
        })
    }

    /// Apply the supplied fields.
    pub async fn update(
        &self,
        actor: UserId,
        id: DepartmentId,
        draft: DepartmentDraft,
    ) -> Result<Department, Error> {
        let mut department = self.load(id).await?;
        if let Some(raw_name) = draft.name {
            let name = EntityName::parse(EntityKind::Department, raw_name)?;
            self.ensure_name_free(&name, Some(id)).await?;
            department.rename(name);
        }
        let updated = self
            .departments
            .update(&department)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Department.not_found_message()))?;
        info!(department_id = %id, user_id = %actor, "department updated");
        Ok(updated)
    }

    /// Delete a department and every patient it manages.
    pub async fn delete(&self, actor: UserId, id: DepartmentId) -> Result<(), Error> {
        if !self.departments.delete(id).await? {
            return Err(Error::not_found(EntityKind::Department.not_found_message()));
        }
        info!(department_id = %id, user_id = %actor, "department deleted");
        Ok(())
    }

    async fn load(&self, id: DepartmentId) -> Result<Department, Error> {
        self.departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Department.not_found_message()))
    }

    async fn ensure_name_free(
        &self,
        name: &EntityName,
        current: Option<DepartmentId>,
    ) -> Result<(), Error> {
        let holder = self.departments.find_by_name(name).await?.map(|d| d.id());
        ensure_name_available(EntityKind::Department, holder, current)?;
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

    fn named(name: &str) -> DepartmentDraft {
        DepartmentDraft {
            name: Some(name.to_owned()),
        }
    }

    #[rstest]
    #[case(DepartmentDraft::default())]
    #[case(named(""))]
    #[case(named("   "))]
    #[tokio::test]
    async fn blank_names_are_rejected(registry: Registry, #[case] draft: DepartmentDraft) {
        let err = registry.departments.create(draft).await.expect_err("blank");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Invalid department name.");
    }

    #[rstest]
    #[tokio::test]
    async fn names_are_unique_but_case_sensitive(registry: Registry) {
        let departments = &registry.departments;
        departments.create(named("Cardiology")).await.expect("first");
        let err = departments
            .create(named("Cardiology"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.message(), "This department name is already in use.");
        departments
            .create(named("cardiology"))
            .await
            .expect("different case is a different name");
    }

    #[rstest]
    #[tokio::test]
    async fn rename_to_taken_name_is_rejected(registry: Registry) {
        let departments = &registry.departments;
        departments.create(named("Cardiology")).await.expect("first");
        let neurology = departments.create(named("Neurology")).await.expect("second");
        let err = departments
            .update(UserId::new(1), neurology.id(), named("Cardiology"))
            .await
            .expect_err("taken");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_twice_reports_not_found(registry: Registry) {
        let departments = &registry.departments;
        let created = departments.create(named("Oncology")).await.expect("created");
        departments
            .delete(UserId::new(1), created.id())
            .await
            .expect("first delete");
        let err = departments
            .delete(UserId::new(1), created.id())
            .await
            .expect_err("second delete");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Department not found");
    }
}
