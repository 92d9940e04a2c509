//! Patient records owned by users.
//!
//! A patient belongs to exactly one user, one hospital, and one department.
//! Reads return a [`PatientRecord`], which embeds the id and name of the
//! hospital and department so adapters can render a patient without touching
//! the reference-data collections.

use std::fmt;

use chrono::NaiveDate;

use super::{DepartmentId, EntityName, Error, HospitalId, PatientId, UserId};

/// Wire format accepted for dates of birth.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Validation errors for patient dates of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOfBirthValidationError {
    /// No date was supplied.
    Empty,
    /// The value is not a `YYYY-MM-DD` calendar date.
    InvalidFormat,
    /// The date is today or later.
    NotInPast,
}

impl fmt::Display for DateOfBirthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Date of birth cannot be empty."),
            Self::InvalidFormat => f.write_str("Invalid date_of_birth format. Use YYYY-MM-DD"),
            Self::NotInPast => f.write_str("Date of birth must be in the past."),
        }
    }
}

impl std::error::Error for DateOfBirthValidationError {}

impl From<DateOfBirthValidationError> for Error {
    fn from(value: DateOfBirthValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Parse a `YYYY-MM-DD` string without any temporal check.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, DateOfBirthValidationError> {
    if raw.trim().is_empty() {
        return Err(DateOfBirthValidationError::Empty);
    }
    NaiveDate::parse_from_str(raw.trim(), DATE_OF_BIRTH_FORMAT)
        .map_err(|_| DateOfBirthValidationError::InvalidFormat)
}

/// Calendar date strictly before the day it was validated on.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use registry_backend::domain::DateOfBirth;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert!(DateOfBirth::validate(NaiveDate::from_ymd_opt(1980, 4, 12).unwrap(), today).is_ok());
/// assert!(DateOfBirth::validate(today, today).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    /// Require `date` to be strictly earlier than `today`.
    pub fn validate(date: NaiveDate, today: NaiveDate) -> Result<Self, DateOfBirthValidationError> {
        if date >= today {
            return Err(DateOfBirthValidationError::NotInPast);
        }
        Ok(Self(date))
    }

    /// Parse a `YYYY-MM-DD` string and require it to precede `today`.
    pub fn parse(raw: &str, today: NaiveDate) -> Result<Self, DateOfBirthValidationError> {
        Self::validate(parse_calendar_date(raw)?, today)
    }

    /// Rehydrate a date already accepted at write time.
    pub fn from_stored(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

/// Patient row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id: PatientId,
    name: EntityName,
    date_of_birth: DateOfBirth,
    user_id: UserId,
    hospital_id: HospitalId,
    department_id: DepartmentId,
}

impl Patient {
    /// Build a patient from validated components and an assigned id.
    pub fn new(id: PatientId, fields: NewPatient) -> Self {
        let NewPatient {
            name,
            date_of_birth,
            user_id,
            hospital_id,
            department_id,
        } = fields;
        Self {
            id,
            name,
            date_of_birth,
            user_id,
            hospital_id,
            department_id,
        }
    }

    /// Patient identifier.
    pub fn id(&self) -> PatientId {
        self.id
    }

    /// Unique patient name.
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// Date of birth.
    pub fn date_of_birth(&self) -> DateOfBirth {
        self.date_of_birth
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Hospital the patient is admitted to.
    pub fn hospital_id(&self) -> HospitalId {
        self.hospital_id
    }

    /// Department managing the patient.
    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    /// Replace the name.
    pub fn rename(&mut self, name: EntityName) {
        self.name = name;
    }

    /// Replace the date of birth.
    pub fn set_date_of_birth(&mut self, date_of_birth: DateOfBirth) {
        self.date_of_birth = date_of_birth;
    }

    /// Move the patient to another hospital.
    pub fn set_hospital(&mut self, hospital_id: HospitalId) {
        self.hospital_id = hospital_id;
    }

    /// Move the patient to another department.
    pub fn set_department(&mut self, department_id: DepartmentId) {
        self.department_id = department_id;
    }
}

/// Patient awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    /// Unique patient name.
    pub name: EntityName,
    /// Validated date of birth.
    pub date_of_birth: DateOfBirth,
    /// Owning user.
    pub user_id: UserId,
    /// Existing hospital.
    pub hospital_id: HospitalId,
    /// Existing department.
    pub department_id: DepartmentId,
}

/// Id and name of a referenced entity, embedded in rendered patients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef<I> {
    /// Referenced id.
    pub id: I,
    /// Referenced name.
    pub name: EntityName,
}

/// Patient joined with the names of its hospital and department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    /// Patient row.
    pub patient: Patient,
    /// Hospital reference.
    pub hospital: EntityRef<HospitalId>,
    /// Department reference.
    pub department: EntityRef<DepartmentId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
    }

    #[rstest]
    #[case("1980-04-12")]
    #[case("2024-04-30")]
    fn past_dates_are_accepted(#[case] raw: &str) {
        let dob = DateOfBirth::parse(raw, today()).expect("past date");
        assert!(dob.date() < today());
    }

    #[rstest]
    #[case("2024-05-01", DateOfBirthValidationError::NotInPast)]
    #[case("2030-01-01", DateOfBirthValidationError::NotInPast)]
    #[case("", DateOfBirthValidationError::Empty)]
    #[case("12/04/1980", DateOfBirthValidationError::InvalidFormat)]
    #[case("1980-02-30", DateOfBirthValidationError::InvalidFormat)]
    fn invalid_dates_are_rejected(#[case] raw: &str, #[case] expected: DateOfBirthValidationError) {
        let err = DateOfBirth::parse(raw, today()).expect_err("invalid date");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn not_in_past_message_matches_contract() {
        assert_eq!(
            DateOfBirthValidationError::NotInPast.to_string(),
            "Date of birth must be in the past."
        );
    }
}
