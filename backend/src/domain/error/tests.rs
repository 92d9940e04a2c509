//! Tests for domain error construction and message handling.

use super::*;
use rstest::rstest;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] err: Error, #[case] expected: ErrorCode) {
    assert_eq!(err.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t")]
fn blank_messages_fall_back(#[case] message: &str) {
    let err = Error::invalid_request(message);
    assert_eq!(err.message(), FALLBACK_MESSAGE);
}

#[rstest]
fn display_matches_message() {
    let err = Error::not_found("Department not found");
    assert_eq!(err.to_string(), "Department not found");
}

#[rstest]
fn codes_serialize_as_snake_case() {
    let value = serde_json::to_value(ErrorCode::ServiceUnavailable).expect("serialize");
    assert_eq!(value, serde_json::json!("service_unavailable"));
}
