//! Envelope assertion helpers
//!
//! Every backend response is wrapped in `{status: "success", data}` or
//! `{status: "error", message, details?}`. These helpers check that shape
//! without depending on backend types.

use actix_web::http::StatusCode;
use serde_json::Value;

/// Content type every JSON response must carry.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Assert a success envelope and return its `data` member.
pub fn assert_success(status: StatusCode, body: &Value, expected_status: StatusCode) -> Value {
    assert_eq!(status, expected_status, "unexpected status, body: {body}");
    assert_eq!(body["status"], "success", "not a success envelope: {body}");
    assert!(body.get("message").is_none(), "success envelope carries a message: {body}");
    body.get("data")
        .cloned()
        .unwrap_or_else(|| panic!("success envelope has no data: {body}"))
}

/// Assert an error envelope with the given status and message.
///
/// Returns the `details` member when present.
pub fn assert_error(
    status: StatusCode,
    body: &Value,
    expected_status: StatusCode,
    expected_message: &str,
) -> Option<Value> {
    assert_eq!(status, expected_status, "unexpected status, body: {body}");
    assert_eq!(body["status"], "error", "not an error envelope: {body}");
    assert_eq!(body["message"], expected_message, "unexpected message: {body}");
    assert!(body.get("data").is_none(), "error envelope carries data: {body}");
    if let Some(details) = body.get("details") {
        assert!(
            details.as_object().is_some_and(|d| !d.is_empty()),
            "details must be omitted when empty: {body}"
        );
    }
    body.get("details").cloned()
}

/// Assert a 422 validation envelope and return the `errors` mapping.
pub fn assert_validation_errors(status: StatusCode, body: &Value, expected_message: &str) -> Value {
    let details = assert_error(status, body, StatusCode::UNPROCESSABLE_ENTITY, expected_message)
        .unwrap_or_else(|| panic!("validation envelope has no details: {body}"));
    details
        .get("errors")
        .cloned()
        .unwrap_or_else(|| panic!("validation details have no errors: {body}"))
}

/// Assert that `errors[field]` contains `message`.
pub fn assert_field_error(errors: &Value, field: &str, message: &str) {
    let messages = errors
        .get(field)
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("no errors for field '{field}': {errors}"));
    assert!(
        messages.iter().any(|m| m == message),
        "field '{field}' lacks message '{message}': {errors}"
    );
}
