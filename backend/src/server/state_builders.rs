//! Port selection and HTTP state construction.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use registry_backend::domain::ports::PasswordHasher;
use registry_backend::example_data::{SeedingError, seed_example_data};
use registry_backend::inbound::http::{HttpState, RegistryPorts};
use registry_backend::outbound::credentials::Argon2CredentialHasher;
use registry_backend::outbound::memory::InMemoryRegistry;
use registry_backend::outbound::persistence::{
    DbPool, DieselDepartmentRepository, DieselHospitalRepository, DieselPatientRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Choose repository adapters: Diesel when a pool is configured, otherwise
/// one shared in-process store.
pub(super) fn build_ports(
    db_pool: Option<&DbPool>,
    hasher: Arc<dyn PasswordHasher>,
) -> RegistryPorts {
    let clock = Arc::new(DefaultClock);
    match db_pool {
        Some(pool) => {
            info!(storage = "postgres", "registry ports configured");
            RegistryPorts {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                patients: Arc::new(DieselPatientRepository::new(pool.clone())),
                hospitals: Arc::new(DieselHospitalRepository::new(pool.clone())),
                departments: Arc::new(DieselDepartmentRepository::new(pool.clone())),
                hasher,
                clock,
            }
        }
        None => {
            info!(storage = "memory", "registry ports configured");
            let store = Arc::new(InMemoryRegistry::new());
            RegistryPorts {
                users: store.clone(),
                patients: store.clone(),
                hospitals: store.clone(),
                departments: store,
                hasher,
                clock,
            }
        }
    }
}

/// Build the shared HTTP state and apply example data when requested.
///
/// # Errors
/// Returns [`SeedingError`] when seeding is enabled and fails.
pub(super) async fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, SeedingError> {
    let ports = build_ports(
        config.db_pool.as_ref(),
        Arc::new(Argon2CredentialHasher::new()),
    );
    let state = HttpState::from(ports);
    if config.seed_example_data {
        seed_example_data(&state).await?;
    } else {
        info!(reason = "disabled", "example data seeding skipped");
    }
    Ok(web::Data::new(state))
}
