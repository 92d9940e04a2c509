//! Domain entities, validation rules, and use-case services.
//!
//! Purpose: keep every registry invariant (unique names, phone and date
//! rules, ownership, derived associations) independent of HTTP and storage.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - Entities: [`User`], [`Patient`], [`Hospital`], [`Department`] with their
//!   identifiers and validated value objects.
//! - Services: [`AccountService`], [`PatientService`], [`HospitalService`],
//!   [`DepartmentService`].
//! - Views: serialisable renderings honouring the exclusion rules.

pub mod access;
pub mod account_service;
pub mod associations;
pub mod auth;
pub mod department;
pub mod department_service;
pub mod error;
pub mod hospital;
pub mod hospital_service;
pub mod ids;
pub mod name;
pub mod patient;
pub mod patient_service;
pub mod ports;
pub mod user;
pub mod views;

pub use self::access::ensure_owner;
pub use self::account_service::{AccountService, UserProfile};
pub use self::associations::{distinct_departments, distinct_hospitals};
pub use self::auth::{CREDENTIALS_REQUIRED_MESSAGE, Credentials, CredentialsValidationError};
pub use self::department::{Department, NewDepartment};
pub use self::department_service::{DepartmentDetail, DepartmentDraft, DepartmentService};
pub use self::error::{Error, ErrorCode};
pub use self::hospital::{Hospital, NewHospital, PhoneNumber, PhoneNumberValidationError};
pub use self::hospital_service::{HospitalDetail, HospitalDraft, HospitalService};
pub use self::ids::{DepartmentId, HospitalId, PatientId, UserId};
pub use self::name::{EntityKind, EntityName, NameValidationError, ensure_name_available};
pub use self::patient::{
    DateOfBirth, DateOfBirthValidationError, EntityRef, NewPatient, Patient, PatientRecord,
    parse_calendar_date,
};
pub use self::patient_service::{PatientDraft, PatientService};
pub use self::user::{CredentialHash, NewUser, User};
pub use self::views::{
    DepartmentView, ErrorBody, HospitalView, PatientView, RefView, UserView, patient_views,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use registry_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("Patient not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
