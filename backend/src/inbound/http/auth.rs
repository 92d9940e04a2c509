//! Login, signup, session check, and logout.
//!
//! ```text
//! POST /signup {"name":"Ann","password":"x"}
//! POST /login {"name":"Ann","password":"x"}
//! GET /check_session
//! DELETE /logout
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use super::ApiResult;
use super::session::{SessionContext, resolve_user};
use super::state::HttpState;
use crate::domain::{Credentials, Error, ErrorBody, UserView};

const NOT_AUTHORIZED_MESSAGE: &str = "Not Authorized";

/// Body for `POST /login` and `POST /signup`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    /// Account name.
    #[serde(default)]
    pub name: Option<String>,
    /// Plaintext password; hashed before storage.
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<&CredentialsRequest> for Credentials {
    type Error = Error;

    fn try_from(value: &CredentialsRequest) -> Result<Self, Self::Error> {
        Ok(Self::try_from_parts(
            value.name.as_deref(),
            value.password.as_deref(),
        )?)
    }
}

/// Authenticate and bind the session to the user.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in", body = UserView,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing name or password", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<UserView>> {
    let credentials = Credentials::try_from(&payload.into_inner())?;
    let profile = state.accounts.verify(&credentials).await?;
    session.persist_user(profile.user.id())?;
    Ok(web::Json(profile.view()))
}

/// Register an account and bind the session to it.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = UserView,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid or duplicate credentials", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(&payload.into_inner())?;
    let profile = state.accounts.register(&credentials).await?;
    session.persist_user(profile.user.id())?;
    Ok(HttpResponse::Created().json(profile.view()))
}

/// Report the user bound to the session.
#[utoipa::path(
    get,
    path = "/check_session",
    responses(
        (status = 200, description = "Current user", body = UserView),
        (status = 401, description = "No session", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "checkSession"
)]
#[get("/check_session")]
pub async fn check_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserView>> {
    let Some(user) = resolve_user(&state, &session).await? else {
        debug!("session check without a live user");
        return Err(Error::unauthorized(NOT_AUTHORIZED_MESSAGE));
    };
    let profile = state.accounts.profile(user.id()).await?;
    Ok(web::Json(profile.view()))
}

/// Clear the session. Succeeds whether or not anyone was logged in.
#[utoipa::path(
    delete,
    path = "/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[delete("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.forget_user();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CREDENTIALS_REQUIRED_MESSAGE, ErrorCode};
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("x"))]
    #[case(Some("  "), Some("x"))]
    #[case(Some("Ann"), None)]
    #[case(Some("Ann"), Some(""))]
    fn incomplete_credentials_are_rejected(
        #[case] name: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        let request = CredentialsRequest {
            name: name.map(str::to_owned),
            password: password.map(str::to_owned),
        };
        let err = Credentials::try_from(&request).expect_err("incomplete");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), CREDENTIALS_REQUIRED_MESSAGE);
    }
}
