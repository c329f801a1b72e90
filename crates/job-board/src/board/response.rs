use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// `{ message, success: true, ..fields }` envelope used by every successful handler.
pub(crate) fn success(status: StatusCode, message: &str, fields: Value) -> Response {
    let mut payload = json!({ "message": message, "success": true });
    if let (Some(target), Value::Object(extra)) = (payload.as_object_mut(), fields) {
        target.extend(extra);
    }
    (status, Json(payload)).into_response()
}

pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "message": message.into(), "success": false });
    (status, Json(payload)).into_response()
}

/// Logs the underlying cause and hides it from the caller.
pub(crate) fn internal_error(operation: &str, err: &dyn Display) -> Response {
    tracing::error!(operation, error = %err, "request failed");
    failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
