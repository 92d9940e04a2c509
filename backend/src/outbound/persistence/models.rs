//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types through the `into_*` helpers below.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    CredentialHash, DateOfBirth, Department, DepartmentId, EntityKind, EntityName, EntityRef,
    Hospital, HospitalId, NewPatient, Patient, PatientId, PatientRecord, PhoneNumber, User,
    UserId,
};

use super::schema::{departments, hospitals, patients, users};

fn stored_name(kind: EntityKind, raw: String) -> Result<EntityName, RepositoryError> {
    EntityName::parse(kind, raw)
        .map_err(|err| RepositoryError::query(format!("stored {kind} row is invalid: {err}")))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub credential_hash: String,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, RepositoryError> {
        Ok(User::new(
            UserId::new(self.id),
            stored_name(EntityKind::User, self.name)?,
            CredentialHash::new(self.credential_hash),
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub credential_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hospitals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HospitalRow {
    pub id: i32,
    pub name: String,
    pub phone_number: String,
}

impl HospitalRow {
    pub(crate) fn into_domain(self) -> Result<Hospital, RepositoryError> {
        let phone_number = PhoneNumber::parse(&self.phone_number).map_err(|err| {
            RepositoryError::query(format!("stored hospital phone number is invalid: {err}"))
        })?;
        Ok(Hospital::new(
            HospitalId::new(self.id),
            stored_name(EntityKind::Hospital, self.name)?,
            phone_number,
        ))
    }

    pub(crate) fn into_ref(self) -> Result<EntityRef<HospitalId>, RepositoryError> {
        Ok(EntityRef {
            id: HospitalId::new(self.id),
            name: stored_name(EntityKind::Hospital, self.name)?,
        })
    }
}

/// Insert and update share one shape for hospitals.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = hospitals)]
pub(crate) struct HospitalFields<'a> {
    pub name: &'a str,
    pub phone_number: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartmentRow {
    pub id: i32,
    pub name: String,
}

impl DepartmentRow {
    pub(crate) fn into_domain(self) -> Result<Department, RepositoryError> {
        Ok(Department::new(
            DepartmentId::new(self.id),
            stored_name(EntityKind::Department, self.name)?,
        ))
    }

    pub(crate) fn into_ref(self) -> Result<EntityRef<DepartmentId>, RepositoryError> {
        Ok(EntityRef {
            id: DepartmentId::new(self.id),
            name: stored_name(EntityKind::Department, self.name)?,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = departments)]
pub(crate) struct DepartmentFields<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: i32,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub user_id: i32,
    pub hospital_id: i32,
    pub department_id: i32,
}

impl PatientRow {
    pub(crate) fn into_domain(self) -> Result<Patient, RepositoryError> {
        Ok(Patient::new(
            PatientId::new(self.id),
            NewPatient {
                name: stored_name(EntityKind::Patient, self.name)?,
                date_of_birth: DateOfBirth::from_stored(self.date_of_birth),
                user_id: UserId::new(self.user_id),
                hospital_id: HospitalId::new(self.hospital_id),
                department_id: DepartmentId::new(self.department_id),
            },
        ))
    }
}

/// Patient joined with its hospital and department rows.
pub(crate) type PatientJoinRow = (PatientRow, HospitalRow, DepartmentRow);

pub(crate) fn into_record(
    (patient, hospital, department): PatientJoinRow,
) -> Result<PatientRecord, RepositoryError> {
    Ok(PatientRecord {
        patient: patient.into_domain()?,
        hospital: hospital.into_ref()?,
        department: department.into_ref()?,
    })
}

/// Insert and update share one shape for patients.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = patients)]
pub(crate) struct PatientFields<'a> {
    pub name: &'a str,
    pub date_of_birth: NaiveDate,
    pub user_id: i32,
    pub hospital_id: i32,
    pub department_id: i32,
}

impl<'a> PatientFields<'a> {
    pub(crate) fn from_new(patient: &'a NewPatient) -> Self {
        Self {
            name: patient.name.as_ref(),
            date_of_birth: patient.date_of_birth.date(),
            user_id: patient.user_id.get(),
            hospital_id: patient.hospital_id.get(),
            department_id: patient.department_id.get(),
        }
    }

    pub(crate) fn from_patient(patient: &'a Patient) -> Self {
        Self {
            name: patient.name().as_ref(),
            date_of_birth: patient.date_of_birth().date(),
            user_id: patient.user_id().get(),
            hospital_id: patient.hospital_id().get(),
            department_id: patient.department_id().get(),
        }
    }
}
