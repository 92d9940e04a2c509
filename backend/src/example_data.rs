//! Example data seeding on startup.
//!
//! Seeds four users (each with a password equal to their name), five Chicago
//! hospitals, five departments, and twenty patients. Everything goes through
//! the domain services, so the usual validation applies. A store that already
//! holds users is left untouched.

use std::collections::HashMap;

use thiserror::Error;
use tracing::info;

use crate::domain::{
    Credentials, DepartmentDraft, DepartmentId, Error, HospitalDraft, HospitalId, PatientDraft,
    UserId,
};
use crate::inbound::http::HttpState;

const USERS: [&str; 4] = ["Lashawn", "Khalid", "Joseph", "Yazen"];

const HOSPITALS: [(&str, &str); 5] = [
    ("University of Chicago Medicine", "7737021000"),
    ("Northwestern Memorial Hospital", "3129262000"),
    ("Rush University Medical Center", "8883527874"),
    ("Evanston Hospital", "8475702000"),
    ("Advocate Christ Medical Center", "7086848000"),
];

const DEPARTMENTS: [&str; 5] = [
    "Cardiology",
    "Neurology",
    "Oncology",
    "Emergency Medicine",
    "Orthopedics",
];

struct PatientSeed {
    name: &'static str,
    date_of_birth: &'static str,
    owner: &'static str,
    hospital: &'static str,
    department: &'static str,
}

const fn patient(
    name: &'static str,
    date_of_birth: &'static str,
    owner: &'static str,
    hospital: &'static str,
    department: &'static str,
) -> PatientSeed {
    PatientSeed {
        name,
        date_of_birth,
        owner,
        hospital,
        department,
    }
}

const UCHICAGO: &str = "University of Chicago Medicine";
const NORTHWESTERN: &str = "Northwestern Memorial Hospital";
const RUSH: &str = "Rush University Medical Center";
const EVANSTON: &str = "Evanston Hospital";
const CHRIST: &str = "Advocate Christ Medical Center";

const PATIENTS: [PatientSeed; 20] = [
    patient("Maria Gonzalez", "1980-04-12", "Lashawn", UCHICAGO, "Cardiology"),
    patient("James Carter", "1975-11-08", "Lashawn", RUSH, "Neurology"),
    patient("Alicia Kim", "1990-06-20", "Lashawn", CHRIST, "Oncology"),
    patient("Robert Thomas", "1968-02-14", "Lashawn", EVANSTON, "Orthopedics"),
    patient("Linda Perez", "2001-10-25", "Lashawn", NORTHWESTERN, "Emergency Medicine"),
    patient("Anthony Davis", "1985-01-13", "Khalid", UCHICAGO, "Neurology"),
    patient("Sophia Patel", "1998-12-30", "Khalid", CHRIST, "Cardiology"),
    patient("Brian Lee", "1979-09-03", "Khalid", NORTHWESTERN, "Oncology"),
    patient("Karen Smith", "1965-05-10", "Khalid", RUSH, "Orthopedics"),
    patient("William Brown", "1992-07-19", "Khalid", EVANSTON, "Emergency Medicine"),
    patient("Emily Johnson", "2000-08-28", "Joseph", RUSH, "Cardiology"),
    patient("Jason Nguyen", "1983-03-16", "Joseph", UCHICAGO, "Oncology"),
    patient("Angela White", "1977-06-04", "Joseph", CHRIST, "Neurology"),
    patient("Michael Rodriguez", "1969-12-09", "Joseph", NORTHWESTERN, "Orthopedics"),
    patient("David Wilson", "1994-02-22", "Joseph", EVANSTON, "Emergency Medicine"),
    patient("Hannah Green", "1999-11-11", "Yazen", NORTHWESTERN, "Neurology"),
    patient("Ethan Martinez", "1986-09-07", "Yazen", UCHICAGO, "Emergency Medicine"),
    patient("Olivia Turner", "1972-01-28", "Yazen", CHRIST, "Oncology"),
    patient("Daniel Scott", "1991-05-03", "Yazen", RUSH, "Cardiology"),
    patient("Grace Evans", "2004-03-17", "Yazen", EVANSTON, "Orthopedics"),
];

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// A service rejected a seed row or the store failed.
    #[error("example data seeding failed: {0}")]
    Service(#[from] Error),
    /// A patient row names a user, hospital, or department that was not seeded.
    #[error("seed patient {patient} references unknown {reference}")]
    UnknownReference {
        /// Patient being seeded.
        patient: &'static str,
        /// Name that could not be resolved.
        reference: &'static str,
    },
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Rows were inserted.
    Applied {
        /// Users created.
        users: usize,
        /// Patients created.
        patients: usize,
    },
    /// Users already existed, so nothing was written.
    AlreadySeeded,
}

/// Seed the example data set through `state`'s services.
///
/// # Errors
/// Returns [`SeedingError`] when a service rejects a row.
pub async fn seed_example_data(state: &HttpState) -> Result<SeedOutcome, SeedingError> {
    if state.accounts.has_users().await? {
        info!(reason = "users present", "example data seeding skipped");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let mut users: HashMap<&str, UserId> = HashMap::new();
    for name in USERS {
        let credentials =
            Credentials::try_from_parts(Some(name), Some(name)).map_err(Error::from)?;
        let profile = state.accounts.register(&credentials).await?;
        users.insert(name, profile.user.id());
    }

    let mut hospitals: HashMap<&str, HospitalId> = HashMap::new();
    for (name, phone) in HOSPITALS {
        let hospital = state
            .hospitals
            .create(HospitalDraft {
                name: Some(name.to_owned()),
                phone_number: Some(phone.to_owned()),
            })
            .await?;
        hospitals.insert(name, hospital.id());
    }

    let mut departments: HashMap<&str, DepartmentId> = HashMap::new();
    for name in DEPARTMENTS {
        let department = state
            .departments
            .create(DepartmentDraft {
                name: Some(name.to_owned()),
            })
            .await?;
        departments.insert(name, department.id());
    }

    for seed in &PATIENTS {
        let missing = |reference| SeedingError::UnknownReference {
            patient: seed.name,
            reference,
        };
        let owner = *users.get(seed.owner).ok_or_else(|| missing(seed.owner))?;
        let hospital = *hospitals
            .get(seed.hospital)
            .ok_or_else(|| missing(seed.hospital))?;
        let department = *departments
            .get(seed.department)
            .ok_or_else(|| missing(seed.department))?;
        state
            .patients
            .create(
                owner,
                PatientDraft {
                    name: Some(seed.name.to_owned()),
                    date_of_birth: Some(seed.date_of_birth.to_owned()),
                    hospital_id: Some(hospital),
                    department_id: Some(department),
                },
            )
            .await?;
    }

    info!(
        users = USERS.len(),
        hospitals = HOSPITALS.len(),
        departments = DEPARTMENTS.len(),
        patients = PATIENTS.len(),
        "example data seeded"
    );
    Ok(SeedOutcome::Applied {
        users: USERS.len(),
        patients: PATIENTS.len(),
    })
}
