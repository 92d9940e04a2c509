//! Session handling and the authentication gate.
//!
//! [`SessionContext`] wraps the cookie session so handlers only bind or clear
//! a user id. [`Identity`] is the gate: extracting it resolves the session to
//! a live user or fails the request with `401 Unauthorized` before the
//! handler body runs.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use super::state::HttpState;
use crate::domain::{Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Message returned when the gate rejects a request.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Thin wrapper over the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind `user_id` to the session and rotate the cookie.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// User id bound to the session, if any.
    ///
    /// A value that does not decode as an id is treated as absent.
    pub fn user_id(&self) -> Option<UserId> {
        match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => id.map(UserId::new),
            Err(error) => {
                warn!(%error, "ignoring undecodable session user id");
                None
            }
        }
    }

    /// Drop every session value and expire the cookie.
    pub fn forget_user(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Authenticated caller resolved from the session.
#[derive(Debug, Clone)]
pub struct Identity(User);

impl Identity {
    /// Caller's id.
    pub fn id(&self) -> UserId {
        self.0.id()
    }

    /// Caller's account.
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Resolve the session to a live user.
pub(crate) async fn resolve_user(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<User>, Error> {
    let Some(id) = session.user_id() else {
        return Ok(None);
    };
    let user = state.accounts.find_user(id).await?;
    if user.is_none() {
        debug!(user_id = %id, "session names a user that no longer exists");
    }
    Ok(user)
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let session = session.await?;
            resolve_user(&state, &session)
                .await?
                .map(Identity)
                .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::Registry;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.user().name().to_string())
    }

    async fn login_as(session: SessionContext, id: web::Path<i32>) -> Result<HttpResponse, Error> {
        session.persist_user(UserId::new(id.into_inner()))?;
        Ok(HttpResponse::Ok().finish())
    }

    #[rstest]
    #[actix_web::test]
    async fn gate_resolves_bound_users_and_rejects_others() {
        let registry = Registry::in_memory();
        let ann = registry.register("Ann", "x").await;
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(registry.http_state()))
                .wrap(crate::test_support::test_session_middleware())
                .route("/login/{id}", web::get().to(login_as))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let anonymous =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        for (id, expected) in [(ann.get(), StatusCode::OK), (404, StatusCode::UNAUTHORIZED)] {
            let login = actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri(&format!("/login/{id}"))
                    .to_request(),
            )
            .await;
            let cookie = login
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .expect("session cookie")
                .into_owned();
            let res = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
            )
            .await;
            assert_eq!(res.status(), expected, "user id {id}");
        }
    }

    #[rstest]
    #[tokio::test]
    async fn missing_state_is_an_internal_error() {
        let req = actix_test::TestRequest::default().to_http_request();
        let err = Identity::extract(&req).await.expect_err("no state");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
