//! Department reference data.
//!
//! Same access rules as hospitals: public listing, session for the rest.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiResult;
use super::session::Identity;
use super::state::HttpState;
use crate::domain::{
    DepartmentDraft, DepartmentId, DepartmentView, ErrorBody, PatientView, patient_views,
};

/// Body for creating or patching a department.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DepartmentRequest {
    /// Unique department name.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<DepartmentRequest> for DepartmentDraft {
    fn from(value: DepartmentRequest) -> Self {
        Self { name: value.name }
    }
}

/// List every department.
#[utoipa::path(
    get,
    path = "/departments",
    responses((status = 200, description = "Departments", body = [DepartmentView])),
    tags = ["departments"],
    operation_id = "listDepartments"
)]
#[get("/departments")]
pub async fn list_departments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DepartmentView>>> {
    let departments = state.departments.list().await?;
    Ok(web::Json(departments.iter().map(DepartmentView::summary).collect()))
}

/// Create a department.
#[utoipa::path(
    post,
    path = "/departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentView),
        (status = 400, description = "Invalid department", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody)
    ),
    tags = ["departments"],
    operation_id = "createDepartment"
)]
#[post("/departments")]
pub async fn create_department(
    state: web::Data<HttpState>,
    _identity: Identity,
    payload: web::Json<DepartmentRequest>,
) -> ApiResult<HttpResponse> {
    let department = state.departments.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(DepartmentView::summary(&department)))
}

/// Fetch a department with the caller's patients there.
#[utoipa::path(
    get,
    path = "/departments/{id}",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department", body = DepartmentView),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "Department not found", body = ErrorBody)
    ),
    tags = ["departments"],
    operation_id = "getDepartment"
)]
#[get("/departments/{id}")]
pub async fn get_department(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<web::Json<DepartmentView>> {
    let detail = state
        .departments
        .get(identity.id(), DepartmentId::new(id.into_inner()))
        .await?;
    Ok(web::Json(DepartmentView::detail(&detail.department, &detail.patients)))
}

/// Update the supplied fields of a department.
#[utoipa::path(
    patch,
    path = "/departments/{id}",
    params(("id" = i32, Path, description = "Department id")),
    request_body = DepartmentRequest,
    responses(
        (status = 202, description = "Department updated", body = DepartmentView),
        (status = 400, description = "Invalid field", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "Department not found", body = ErrorBody)
    ),
    tags = ["departments"],
    operation_id = "updateDepartment"
)]
#[patch("/departments/{id}")]
pub async fn update_department(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
    payload: web::Json<DepartmentRequest>,
) -> ApiResult<HttpResponse> {
    let department = state
        .departments
        .update(
            identity.id(),
            DepartmentId::new(id.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(HttpResponse::Accepted().json(DepartmentView::summary(&department)))
}

/// Delete a department and its patients.
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 404, description = "Department not found", body = ErrorBody)
    ),
    tags = ["departments"],
    operation_id = "deleteDepartment"
)]
#[delete("/departments/{id}")]
pub async fn delete_department(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .departments
        .delete(identity.id(), DepartmentId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The caller's patients in a department; empty for unknown departments.
#[utoipa::path(
    get,
    path = "/departments/{id}/patients",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 200, description = "Caller's patients in the department", body = [PatientView]),
        (status = 401, description = "Not signed in", body = ErrorBody)
    ),
    tags = ["departments"],
    operation_id = "listDepartmentPatients"
)]
#[get("/departments/{id}/patients")]
pub async fn list_department_patients(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<i32>,
) -> ApiResult<web::Json<Vec<PatientView>>> {
    let records = state
        .patients
        .list_for_department(identity.id(), DepartmentId::new(id.into_inner()))
        .await?;
    Ok(web::Json(patient_views(&records)))
}
