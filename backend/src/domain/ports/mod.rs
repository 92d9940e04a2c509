//! Domain ports for the hexagonal boundary.
//!
//! Repositories are driven ports implemented by the Diesel adapters in
//! `outbound::persistence` and the in-process store in `outbound::memory`.

mod macros;
pub(crate) use macros::define_port_error;

mod department_repository;
mod hospital_repository;
mod password_hasher;
mod patient_repository;
mod repository_error;
mod user_repository;

pub use department_repository::DepartmentRepository;
pub use hospital_repository::HospitalRepository;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use patient_repository::PatientRepository;
pub use repository_error::RepositoryError;
pub use user_repository::UserRepository;
