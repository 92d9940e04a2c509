//! Serialisable representations of registry entities.
//!
//! Rendering follows fixed exclusion rules so nested output never cycles:
//! patients omit their owner, hospitals and departments embedded in a patient
//! carry only `{id, name}`, and collection listings of hospitals and
//! departments leave out patients entirely. A user's hospitals and
//! departments use the detail form restricted to that user's patients.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::{Department, EntityRef, Hospital, PatientRecord, User};

/// Id and name of a hospital or department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RefView {
    /// Entity id.
    #[schema(example = 1)]
    pub id: i32,
    /// Entity name.
    #[schema(example = "Cardiology")]
    pub name: String,
}

impl<I: Into<i32> + Copy> From<&EntityRef<I>> for RefView {
    fn from(value: &EntityRef<I>) -> Self {
        Self {
            id: value.id.into(),
            name: value.name.to_string(),
        }
    }
}

/// Patient as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PatientView {
    /// Patient id.
    pub id: i32,
    /// Patient name.
    #[schema(example = "John Smith")]
    pub name: String,
    /// Date of birth (`YYYY-MM-DD`).
    #[schema(value_type = String, example = "1980-04-12")]
    pub date_of_birth: NaiveDate,
    /// Hospital the patient is admitted to.
    pub hospital: RefView,
    /// Department managing the patient.
    pub department: RefView,
}

impl From<&PatientRecord> for PatientView {
    fn from(record: &PatientRecord) -> Self {
        Self {
            id: record.patient.id().get(),
            name: record.patient.name().to_string(),
            date_of_birth: record.patient.date_of_birth().date(),
            hospital: RefView::from(&record.hospital),
            department: RefView::from(&record.department),
        }
    }
}

/// Render a list of patient records.
pub fn patient_views(records: &[PatientRecord]) -> Vec<PatientView> {
    records.iter().map(PatientView::from).collect()
}

/// User profile with patients and the hospitals and departments they touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserView {
    /// User id.
    pub id: i32,
    /// Unique user name.
    #[schema(example = "Lashawn")]
    pub name: String,
    /// Patients owned by the user.
    pub patients: Vec<PatientView>,
    /// Hospitals referenced by the user's patients, each with those patients.
    pub hospitals: Vec<HospitalView>,
    /// Departments referenced by the user's patients, each with those patients.
    pub departments: Vec<DepartmentView>,
}

impl UserView {
    /// Render `user` with the patients it owns.
    ///
    /// `hospitals` and `departments` are rendered in the order given, each
    /// listing only the records from `records` that reference it.
    pub fn new(
        user: &User,
        records: &[PatientRecord],
        hospitals: &[Hospital],
        departments: &[Department],
    ) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
            patients: patient_views(records),
            hospitals: hospitals
                .iter()
                .map(|hospital| {
                    let held = records_where(records, |r| r.hospital.id == hospital.id());
                    HospitalView::detail(hospital, &held)
                })
                .collect(),
            departments: departments
                .iter()
                .map(|department| {
                    let held = records_where(records, |r| r.department.id == department.id());
                    DepartmentView::detail(department, &held)
                })
                .collect(),
        }
    }
}

fn records_where(
    records: &[PatientRecord],
    keep: impl Fn(&PatientRecord) -> bool,
) -> Vec<PatientRecord> {
    records.iter().filter(|record| keep(record)).cloned().collect()
}

/// Hospital as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HospitalView {
    /// Hospital id.
    pub id: i32,
    /// Unique hospital name.
    #[schema(example = "Evanston Hospital")]
    pub name: String,
    /// Ten digit phone number.
    #[schema(example = "8475702000")]
    pub phone_number: String,
    /// Requesting user's patients in this hospital (detail view only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patients: Option<Vec<PatientView>>,
}

impl HospitalView {
    /// Listing form without patients.
    pub fn summary(hospital: &Hospital) -> Self {
        Self {
            id: hospital.id().get(),
            name: hospital.name().to_string(),
            phone_number: hospital.phone_number().as_ref().to_owned(),
            patients: None,
        }
    }

    /// Detail form including the viewer's patients.
    pub fn detail(hospital: &Hospital, records: &[PatientRecord]) -> Self {
        Self {
            patients: Some(patient_views(records)),
            ..Self::summary(hospital)
        }
    }
}

/// Department as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepartmentView {
    /// Department id.
    pub id: i32,
    /// Unique department name.
    #[schema(example = "Neurology")]
    pub name: String,
    /// Requesting user's patients in this department (detail view only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patients: Option<Vec<PatientView>>,
}

impl DepartmentView {
    /// Listing form without patients.
    pub fn summary(department: &Department) -> Self {
        Self {
            id: department.id().get(),
            name: department.name().to_string(),
            patients: None,
        }
    }

    /// Detail form including the viewer's patients.
    pub fn detail(department: &Department, records: &[PatientRecord]) -> Self {
        Self {
            patients: Some(patient_views(records)),
            ..Self::summary(department)
        }
    }
}

/// Error envelope returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    /// `"<status>: <message>"`.
    #[schema(example = "404: Hospital not found")]
    pub error: String,
}
