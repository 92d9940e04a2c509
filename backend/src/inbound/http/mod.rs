//! HTTP inbound adapter exposing the registry's REST endpoints.

use actix_web::web;

pub mod auth;
pub mod departments;
pub mod error;
pub mod extractors;
pub mod health;
pub mod hospitals;
pub mod index;
pub mod patients;
pub mod session;
pub mod session_config;
pub mod state;
pub mod users;

pub use error::ApiResult;
pub use state::{HttpState, RegistryPorts};

/// Register every registry route plus the JSON and path error handlers.
///
/// Callers supply `web::Data<HttpState>` and a session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(extractors::json_config())
        .app_data(extractors::path_config())
        .service(index::index)
        .service(auth::login)
        .service(auth::signup)
        .service(auth::check_session)
        .service(auth::logout)
        .service(users::list_users)
        .service(users::get_user)
        .service(patients::list_patients)
        .service(patients::create_patient)
        .service(patients::get_patient)
        .service(patients::update_patient)
        .service(patients::delete_patient)
        .service(hospitals::list_hospitals)
        .service(hospitals::create_hospital)
        .service(hospitals::list_hospital_patients)
        .service(hospitals::get_hospital)
        .service(hospitals::update_hospital)
        .service(hospitals::delete_hospital)
        .service(departments::list_departments)
        .service(departments::create_department)
        .service(departments::list_department_patients)
        .service(departments::get_department)
        .service(departments::update_department)
        .service(departments::delete_department);
}
