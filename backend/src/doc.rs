//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every registry route, the request and view schemas,
//! and the session cookie security scheme. The document backs Swagger UI in
//! debug builds and is exported by `cargo run --bin openapi-dump`.

use crate::domain::{DepartmentView, ErrorBody, HospitalView, PatientView, RefView, UserView};
use crate::inbound::http::auth::CredentialsRequest;
use crate::inbound::http::departments::DepartmentRequest;
use crate::inbound::http::hospitals::HospitalRequest;
use crate::inbound::http::patients::PatientRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login or POST /signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Patient registry API",
        description = "Session-authenticated access to users, patients, hospitals, and departments.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::index::index,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::check_session,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::patients::list_patients,
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::get_patient,
        crate::inbound::http::patients::update_patient,
        crate::inbound::http::patients::delete_patient,
        crate::inbound::http::hospitals::list_hospitals,
        crate::inbound::http::hospitals::create_hospital,
        crate::inbound::http::hospitals::get_hospital,
        crate::inbound::http::hospitals::update_hospital,
        crate::inbound::http::hospitals::delete_hospital,
        crate::inbound::http::hospitals::list_hospital_patients,
        crate::inbound::http::departments::list_departments,
        crate::inbound::http::departments::create_department,
        crate::inbound::http::departments::get_department,
        crate::inbound::http::departments::update_department,
        crate::inbound::http::departments::delete_department,
        crate::inbound::http::departments::list_department_patients,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserView,
        PatientView,
        RefView,
        HospitalView,
        DepartmentView,
        ErrorBody,
        CredentialsRequest,
        PatientRequest,
        HospitalRequest,
        DepartmentRequest,
    )),
    tags(
        (name = "auth", description = "Signup, login, and session management"),
        (name = "users", description = "Registered users and their associations"),
        (name = "patients", description = "Patients owned by the signed-in user"),
        (name = "hospitals", description = "Hospital reference data"),
        (name = "departments", description = "Department reference data"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "misc", description = "Landing page")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("UserView", &["id", "name", "patients", "hospitals", "departments"])]
    #[case("PatientView", &["id", "name", "date_of_birth", "hospital", "department"])]
    #[case("HospitalView", &["id", "name", "phone_number", "patients"])]
    #[case("ErrorBody", &["error"])]
    fn view_schemas_expose_their_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = schema_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    #[case("/patients/{id}")]
    #[case("/hospitals/{id}/patients")]
    #[case("/check_session")]
    fn registry_paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
