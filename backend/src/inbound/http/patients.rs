//! Patient records owned by the signed-in user.
//!
//! ```text
//! GET /patients
//! POST /patients {"name":"Jo","date_of_birth":"1980-04-12","hospital_id":1,"department_id":2}
//! GET /patients/{id}
//! PATCH /patients/{id} {"name":"Jo Smith"}
//! DELETE /patients/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiResult;
use super::extractors::{IdInput, resolve_optional};
use super::session::Identity;
use super::state::HttpState;
use crate::domain::{ErrorBody, PatientDraft, PatientId, PatientView, patient_views};

/// Body for creating or patching a patient.
///
/// Creation requires every field; a patch applies only the fields present.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatientRequest {
    /// Unique patient name.
    #[serde(default)]
    pub name: Option<String>,
    /// Birth date as `YYYY-MM-DD`.
    #[serde(default)]
    #[schema(example = "1980-04-12")]
    pub date_of_birth: Option<String>,
    /// Hospital the patient is admitted to.
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub hospital_id: Option<IdInput>,
    /// Department treating the patient.
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub department_id: Option<IdInput>,
}

impl PatientRequest {
    fn into_draft(self) -> ApiResult<PatientDraft> {
        Ok(PatientDraft {
            hospital_id: resolve_optional(self.hospital_id.as_ref(), "hospital_id")?,
            department_id: resolve_optional(self.department_id.as_ref(), "department_id")?,
            name: self.name,
            date_of_birth: self.date_of_birth,
        })
    }
}

/// List the caller's patients.
#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "Caller's patients", body = [PatientView]),
        (status = 401, description = "Not signed in", body = ErrorBody)
    ),
    tags = ["patients"],
    operation_id = "listPatients"
)]
#[get("/patients")]
pub async fn list_patients(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<PatientView>>> {
    let records = state.patients.list(identity.id()).await?;
    Ok(web::Json(patient_views(&records)))
}

/// Admit a patient owned by the caller.
#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientView),
        (status = 400, description = "Invalid patient", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "Unknown hospital or department", body = ErrorBody)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("/patients")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<PatientRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let record = state.patients.create(identity.id(), draft).await?;
    Ok(HttpResponse::Created().json(PatientView::from(&record)))
}

/// Fetch one of the caller's patients.
#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = i32, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = PatientView),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Patient not found", body = ErrorBody)
    ),
    tags = ["patients"],
    operation_id = "getPatient"
)]
#[get("/patients/{id}")]
pub async fn get_patient(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<web::Json<PatientView>> {
    let record = state
        .patients
        .get(identity.id(), PatientId::new(id.into_inner()))
        .await?;
    Ok(web::Json(PatientView::from(&record)))
}

/// Update the supplied fields of one of the caller's patients.
#[utoipa::path(
    patch,
    path = "/patients/{id}",
    params(("id" = i32, Path, description = "Patient id")),
    request_body = PatientRequest,
    responses(
        (status = 202, description = "Patient updated", body = PatientView),
        (status = 400, description = "Invalid field", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Patient, hospital, or department not found", body = ErrorBody)
    ),
    tags = ["patients"],
    operation_id = "updatePatient"
)]
#[patch("/patients/{id}")]
pub async fn update_patient(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
    payload: web::Json<PatientRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let record = state
        .patients
        .update(identity.id(), PatientId::new(id.into_inner()), draft)
        .await?;
    Ok(HttpResponse::Accepted().json(PatientView::from(&record)))
}

/// Delete one of the caller's patients.
#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = i32, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 403, description = "Owned by another user", body = ErrorBody),
        (status = 404, description = "Patient not found", body = ErrorBody)
    ),
    tags = ["patients"],
    operation_id = "deletePatient"
)]
#[delete("/patients/{id}")]
pub async fn delete_patient(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .patients
        .delete(identity.id(), PatientId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
