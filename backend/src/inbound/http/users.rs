//! Public user listing.
//!
//! ```text
//! GET /users
//! GET /users/{id}
//! ```

use actix_web::{get, web};

use super::ApiResult;
use super::state::HttpState;
use crate::domain::{ErrorBody, UserId, UserView};

/// List every user with their patients and derived associations.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users", body = [UserView])),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserView>>> {
    let profiles = state.accounts.list_profiles().await?;
    Ok(web::Json(profiles.iter().map(|profile| profile.view()).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<UserView>> {
    let profile = state.accounts.profile(UserId::new(id.into_inner())).await?;
    Ok(web::Json(profile.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Registry;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn users_are_public_and_missing_ids_are_404() {
        let registry = Registry::in_memory();
        let ann = registry.register("Ann", "x").await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(registry.http_state()))
                .service(list_users)
                .service(get_user),
        )
        .await;

        let listed: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;
        assert_eq!(
            listed,
            json!([{
                "id": ann.get(),
                "name": "Ann",
                "patients": [],
                "hospitals": [],
                "departments": []
            }])
        );

        let missing = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/999").to_request(),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(missing).await;
        assert_eq!(body, json!({"error": "404: User not found"}));
    }
}
