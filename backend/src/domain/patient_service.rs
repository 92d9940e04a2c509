//! Patient use-cases: ownership, validation, and referential checks.
//!
//! Every operation takes the caller's [`UserId`] explicitly. Reads and writes
//! of a single patient report a missing row before checking ownership, so a
//! caller can tell "does not exist" from "not yours".

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::info;

use super::access::ensure_owner;
use super::ports::{DepartmentRepository, HospitalRepository, PatientRepository};
use super::{
    DateOfBirth, DepartmentId, EntityKind, EntityName, Error, HospitalId, NewPatient, PatientId,
    PatientRecord, UserId, ensure_name_available, parse_calendar_date,
};

/// Message returned when a create payload lacks a field.
pub const PATIENT_FIELDS_REQUIRED_MESSAGE: &str =
    "Name, date_of_birth, hospital_id, and department_id are required";

/// Raw patient fields as supplied by a client.
///
/// On create every field is required; on update only the supplied fields are
/// validated and applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    /// Patient name.
    pub name: Option<String>,
    /// Date of birth in `YYYY-MM-DD` form.
    pub date_of_birth: Option<String>,
    /// Target hospital.
    pub hospital_id: Option<HospitalId>,
    /// Target department.
    pub department_id: Option<DepartmentId>,
}

/// Patient use-cases.
#[derive(Clone)]
pub struct PatientService {
    patients: Arc<dyn PatientRepository>,
    hospitals: Arc<dyn HospitalRepository>,
    departments: Arc<dyn DepartmentRepository>,
    clock: Arc<dyn Clock>,
}

impl PatientService {
    /// Build the service from its ports and a clock.
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        hospitals: Arc<dyn HospitalRepository>,
        departments: Arc<dyn DepartmentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            patients,
            hospitals,
            departments,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Patients owned by `owner`.
    pub async fn list(&self, owner: UserId) -> Result<Vec<PatientRecord>, Error> {
        Ok(self.patients.list_for_user(owner).await?)
    }

    /// Register a patient for `owner`.
    pub async fn create(&self, owner: UserId, draft: PatientDraft) -> Result<PatientRecord, Error> {
        let PatientDraft {
            name: Some(raw_name),
            date_of_birth: Some(raw_dob),
            hospital_id: Some(hospital_id),
            department_id: Some(department_id),
        } = draft
        else {
            return Err(Error::invalid_request(PATIENT_FIELDS_REQUIRED_MESSAGE));
        };
        if raw_name.is_empty() || raw_dob.is_empty() {
            return Err(Error::invalid_request(PATIENT_FIELDS_REQUIRED_MESSAGE));
        }

        let date = parse_calendar_date(&raw_dob)?;
        self.require_hospital(hospital_id).await?;
        self.require_department(department_id).await?;

        let name = EntityName::parse(EntityKind::Patient, raw_name)?;
        self.ensure_name_free(&name, None).await?;
        let date_of_birth = DateOfBirth::validate(date, self.today())?;

        let record = self
            .patients
            .create(&NewPatient {
                name,
                date_of_birth,
                user_id: owner,
                hospital_id,
                department_id,
            })
            .await?;
        info!(
            patient_id = %record.patient.id(),
            user_id = %owner,
            "patient created"
        );
        Ok(record)
    }

    /// One patient owned by `owner`.
    pub async fn get(&self, owner: UserId, id: PatientId) -> Result<PatientRecord, Error> {
        self.load_owned(owner, id).await
    }

    /// Apply the supplied fields to a patient owned by `owner`.
    pub async fn update(
        &self,
        owner: UserId,
        id: PatientId,
        draft: PatientDraft,
    ) -> Result<PatientRecord, Error> {
        let record = self.load_owned(owner, id).await?;
        let mut patient = record.patient;

        if let Some(raw_name) = draft.name {
            let name = EntityName::parse(EntityKind::Patient, raw_name)?;
            self.ensure_name_free(&name, Some(id)).await?;
            patient.rename(name);
        }
        if let Some(raw_dob) = draft.date_of_birth {
            patient.set_date_of_birth(DateOfBirth::parse(&raw_dob, self.today())?);
        }
        if let Some(hospital_id) = draft.hospital_id {
            self.require_hospital(hospital_id).await?;
            patient.set_hospital(hospital_id);
        }
        if let Some(department_id) = draft.department_id {
            self.require_department(department_id).await?;
            patient.set_department(department_id);
        }

        let updated = self
            .patients
            .update(&patient)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Patient.not_found_message()))?;
        info!(patient_id = %id, user_id = %owner, "patient updated");
        Ok(updated)
    }

    /// Delete a patient owned by `owner`.
    pub async fn delete(&self, owner: UserId, id: PatientId) -> Result<(), Error> {
        self.load_owned(owner, id).await?;
        if !self.patients.delete(id).await? {
            return Err(Error::not_found(EntityKind::Patient.not_found_message()));
        }
        info!(patient_id = %id, user_id = %owner, "patient deleted");
        Ok(())
    }

    /// Patients of `owner` in `hospital`; empty when the hospital is unknown.
    pub async fn list_for_hospital(
        &self,
        owner: UserId,
        hospital: HospitalId,
    ) -> Result<Vec<PatientRecord>, Error> {
        Ok(self.patients.list_for_hospital(hospital, owner).await?)
    }

    /// Patients of `owner` in `department`; empty when the department is unknown.
    pub async fn list_for_department(
        &self,
        owner: UserId,
        department: DepartmentId,
    ) -> Result<Vec<PatientRecord>, Error> {
        Ok(self.patients.list_for_department(department, owner).await?)
    }

    async fn load_owned(&self, owner: UserId, id: PatientId) -> Result<PatientRecord, Error> {
        let record = self
            .patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Patient.not_found_message()))?;
        ensure_owner(owner, &record.patient)?;
        Ok(record)
    }

    async fn ensure_name_free(
        &self,
        name: &EntityName,
        current: Option<PatientId>,
    ) -> Result<(), Error> {
        let holder = self.patients.find_by_name(name).await?.map(|p| p.id());
        ensure_name_available(EntityKind::Patient, holder, current)?;
        Ok(())
    }

    async fn require_hospital(&self, id: HospitalId) -> Result<(), Error> {
        match self.hospitals.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(EntityKind::Hospital.not_found_message())),
        }
    }

    async fn require_department(&self, id: DepartmentId) -> Result<(), Error> {
        match self.departments.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(EntityKind::Department.not_found_message())),
        }
    }
}
