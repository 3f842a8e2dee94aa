//! Assertion helpers
//!
//! Every error response has the shape `{"error": <message>, "status": <code>}`.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert a JSON error response with the given status and message
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: Value = response.json();
    assert_eq!(body["status"], status.as_u16());
    assert_eq!(body["error"], message);
}

/// Assert a JSON error response with the given status, any message
pub fn assert_error_status(response: &TestResponse, status: StatusCode) {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: Value = response.json();
    assert_eq!(body["status"], status.as_u16());
    assert!(body["error"].is_string());
}

/// Assert a user payload carries no secret fields
pub fn assert_no_secrets(user: &Value) {
    let object = user.as_object().expect("user is a JSON object");
    for field in [
        "password",
        "passwordHash",
        "password_hash",
        "refreshToken",
        "refresh_token",
    ] {
        assert!(
            !object.contains_key(field),
            "user payload leaks `{}`: {}",
            field,
            user
        );
    }
}
