//! Hospital reference data.
//!
//! Listing is public. Everything else requires a session, but any signed-in
//! user may edit or delete a hospital.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiResult;
use super::session::Identity;
use super::state::HttpState;
use crate::domain::{
    ErrorBody, HospitalDraft, HospitalId, HospitalView, PatientView, patient_views,
};

/// Body for creating or patching a hospital.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct HospitalRequest {
    /// Unique hospital name.
    #[serde(default)]
    pub name: Option<String>,
    /// Phone number; punctuation is stripped, ten digits must remain.
    #[serde(default)]
    #[schema(example = "(847) 570-2000")]
    pub phone_number: Option<String>,
}

impl From<HospitalRequest> for HospitalDraft {
    fn from(value: HospitalRequest) -> Self {
        Self {
            name: value.name,
            phone_number: value.phone_number,
        }
    }
}

/// List every hospital.
#[utoipa::path(
    get,
    path = "/hospitals",
    responses((status = 200, description = "Hospitals", body = [HospitalView])),
    tags = ["hospitals"],
    operation_id = "listHospitals"
)]
#[get("/hospitals")]
pub async fn list_hospitals(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<HospitalView>>> {
    let hospitals = state.hospitals.list().await?;
    Ok(web::Json(hospitals.iter().map(HospitalView::summary).collect()))
}

/// Create a hospital.
#[utoipa::path(
    post,
    path = "/hospitals",
    request_body = HospitalRequest,
    responses(
        (status = 201, description = "Hospital created", body = HospitalView),
        (status = 400, description = "Invalid hospital", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody)
    ),
    tags = ["hospitals"],
    operation_id = "createHospital"
)]
#[post("/hospitals")]
pub async fn create_hospital(
    state: web::Data<HttpState>,
    _identity: Identity,
    payload: web::Json<HospitalRequest>,
) -> ApiResult<HttpResponse> {
    let hospital = state.hospitals.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(HospitalView::summary(&hospital)))
}

/// Fetch a hospital with the caller's patients there.
#[utoipa::path(
    get,
    path = "/hospitals/{id}",
    params(("id" = i32, Path, description = "Hospital id")),
    responses(
        (status = 200, description = "Hospital", body = HospitalView),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "Hospital not found", body = ErrorBody)
    ),
    tags = ["hospitals"],
    operation_id = "getHospital"
)]
#[get("/hospitals/{id}")]
pub async fn get_hospital(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<web::Json<HospitalView>> {
    let detail = state
        .hospitals
        .get(identity.id(), HospitalId::new(id.into_inner()))
        .await?;
    Ok(web::Json(HospitalView::detail(&detail.hospital, &detail.patients)))
}

/// Update the supplied fields of a hospital.
#[utoipa::path(
    patch,
    path = "/hospitals/{id}",
    params(("id" = i32, Path, description = "Hospital id")),
    request_body = HospitalRequest,
    responses(
        (status = 202, description = "Hospital updated", body = HospitalView),
        (status = 400, description = "Invalid field", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "Hospital not found", body = ErrorBody)
    ),
    tags = ["hospitals"],
    operation_id = "updateHospital"
)]
#[patch("/hospitals/{id}")]
pub async fn update_hospital(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
    payload: web::Json<HospitalRequest>,
) -> ApiResult<HttpResponse> {
    let hospital = state
        .hospitals
        .update(
            identity.id(),
            HospitalId::new(id.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(HttpResponse::Accepted().json(HospitalView::summary(&hospital)))
}

/// Delete a hospital and its patients.
#[utoipa::path(
    delete,
    path = "/hospitals/{id}",
    params(("id" = i32, Path, description = "Hospital id")),
    responses(
        (status = 204, description = "Hospital deleted"),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "Hospital not found", body = ErrorBody)
    ),
    tags = ["hospitals"],
    operation_id = "deleteHospital"
)]
#[delete("/hospitals/{id}")]
pub async fn delete_hospital(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .hospitals
        .delete(identity.id(), HospitalId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The caller's patients in a hospital; empty for unknown hospitals.
#[utoipa::path(
    get,
    path = "/hospitals/{id}/patients",
    params(("id" = i32, Path, description = "Hospital id")),
    responses(
        (status = 200, description = "Caller's patients in the hospital", body = [PatientView]),
        (status = 401, description = "Not signed in", body = ErrorBody)
    ),
    tags = ["hospitals"],
    operation_id = "listHospitalPatients"
)]
#[get("/hospitals/{id}/patients")]
pub async fn list_hospital_patients(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Vec<PatientView>>> {
    let records = state
        .patients
        .list_for_hospital(identity.id(), HospitalId::new(id.into_inner()))
        .await?;
    Ok(web::Json(patient_views(&records)))
}
