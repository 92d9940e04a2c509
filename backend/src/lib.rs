//! Patient registry backend.
//!
//! A session-authenticated REST service for users, patients, hospitals, and
//! departments. The crate follows a hexagonal layout:
//!
//! - [`domain`]: entities, validation, services, and the ports they depend on.
//! - [`inbound`]: the Actix HTTP adapter.
//! - [`outbound`]: Diesel, in-memory, and credential hashing adapters.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
