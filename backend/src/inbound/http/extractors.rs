//! Request-shape helpers shared by the HTTP handlers.
//!
//! Malformed JSON bodies and non-integer path segments are reported through
//! the same `{"error": ...}` envelope as domain failures.

use actix_web::{HttpRequest, error::JsonPayloadError, error::PathError, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::Error;

/// JSON extractor configuration that maps payload errors to `400`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor configuration that maps parse errors to `400`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejecting malformed JSON body");
    Error::invalid_request(format!("Invalid JSON body: {err}")).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejecting malformed path");
    Error::invalid_request("Identifiers must be integers").into()
}

/// Entity id supplied in a request body.
///
/// Clients send either a JSON number or a numeric string such as `"3"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum IdInput {
    /// Plain integer id.
    Number(i32),
    /// Id encoded as decimal text.
    Text(String),
}

impl IdInput {
    /// Resolve to an integer id, naming `field` in the error.
    pub fn resolve<I: From<i32>>(&self, field: &str) -> Result<I, Error> {
        match self {
            Self::Number(raw) => Ok(I::from(*raw)),
            Self::Text(text) => text
                .trim()
                .parse::<i32>()
                .map(I::from)
                .map_err(|_| Error::invalid_request(format!("{field} must be an integer"))),
        }
    }
}

/// Resolve an optional body id.
pub fn resolve_optional<I: From<i32>>(
    value: Option<&IdInput>,
    field: &str,
) -> Result<Option<I>, Error> {
    value.map(|id| id.resolve(field)).transpose()
}
