//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever talk to domain
//! services, so any set of port implementations can sit behind them.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    DepartmentRepository, HospitalRepository, PasswordHasher, PatientRepository, UserRepository,
};
use crate::domain::{AccountService, DepartmentService, HospitalService, PatientService};

/// Parameter object bundling every port the services need.
#[derive(Clone)]
pub struct RegistryPorts {
    /// User storage.
    pub users: Arc<dyn UserRepository>,
    /// Patient storage.
    pub patients: Arc<dyn PatientRepository>,
    /// Hospital storage.
    pub hospitals: Arc<dyn HospitalRepository>,
    /// Department storage.
    pub departments: Arc<dyn DepartmentRepository>,
    /// Credential hashing.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Source of "today" for date-of-birth checks.
    pub clock: Arc<dyn Clock>,
}

/// Services available to HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and profiles.
    pub accounts: AccountService,
    /// Patient records.
    pub patients: PatientService,
    /// Hospital reference data.
    pub hospitals: HospitalService,
    /// Department reference data.
    pub departments: DepartmentService,
}

impl From<RegistryPorts> for HttpState {
    fn from(ports: RegistryPorts) -> Self {
        let RegistryPorts {
            users,
            patients,
            hospitals,
            departments,
            hasher,
            clock,
        } = ports;
        Self {
            accounts: AccountService::new(
                users,
                Arc::clone(&patients),
                Arc::clone(&hospitals),
                Arc::clone(&departments),
                hasher,
            ),
            hospitals: HospitalService::new(Arc::clone(&hospitals), Arc::clone(&patients)),
            departments: DepartmentService::new(Arc::clone(&departments), Arc::clone(&patients)),
            patients: PatientService::new(patients, hospitals, departments, clock),
        }
    }
}
