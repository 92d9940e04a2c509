//! PostgreSQL persistence adapters using Diesel and `diesel-async`.
//!
//! Repositories only translate between Diesel rows and domain types; all
//! validation lives in the domain services. Row structs (`models.rs`) and
//! table definitions (`schema.rs`) stay private to this module. Database
//! constraints back the service pre-checks: unique names surface as
//! `RepositoryError::DuplicateName` and foreign key failures as
//! `RepositoryError::MissingReference`.
//!
//! ```ignore
//! use registry_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_department_repository;
mod diesel_hospital_repository;
mod diesel_patient_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_department_repository::DieselDepartmentRepository;
pub use diesel_hospital_repository::DieselHospitalRepository;
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::run_pending_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
