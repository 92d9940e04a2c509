//! HTTP mapping for domain errors.
//!
//! Every failure renders as `{"error": "<status>: <message>"}`. Internal
//! errors are logged and replaced by a generic message so storage details
//! never reach clients.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorBody, ErrorCode};
use crate::middleware::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the client-facing envelope for `error`.
pub(crate) fn error_body(error: &Error) -> ErrorBody {
    let status = status_for(error.code());
    let message = match error.code() {
        ErrorCode::InternalError => REDACTED_MESSAGE,
        _ => error.message(),
    };
    ErrorBody {
        error: format!("{}: {message}", status.as_u16()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            let trace_id = TraceId::current().map(|id| id.to_string());
            error!(message = self.message(), trace_id = ?trace_id, "internal error");
        }
        HttpResponse::build(self.status_code()).json(error_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn render(error: Error) -> (StatusCode, Value) {
        let response = ResponseError::error_response(&error);
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[rstest]
    #[case(Error::invalid_request("Invalid hospital name."), 400, "400: Invalid hospital name.")]
    #[case(Error::unauthorized("Unauthorized"), 401, "401: Unauthorized")]
    #[case(Error::forbidden("Forbidden"), 403, "403: Forbidden")]
    #[case(Error::not_found("Hospital not found"), 404, "404: Hospital not found")]
    #[case(
        Error::service_unavailable("Registry store is unavailable"),
        503,
        "503: Registry store is unavailable"
    )]
    #[actix_web::test]
    async fn errors_render_status_prefixed_envelopes(
        #[case] error: Error,
        #[case] status: u16,
        #[case] body: &str,
    ) {
        let (actual_status, value) = render(error).await;
        assert_eq!(actual_status.as_u16(), status);
        assert_eq!(value, json!({ "error": body }));
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let (status, value) = render(Error::internal("repository query failed: syntax")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value, json!({ "error": "500: Internal server error" }));
    }
}
