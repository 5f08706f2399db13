use serde_json::Value;

use crate::http::{header, IntoResponse, Json, Response, StatusCode};

/// Build a controller response: JSON when a body is given, an empty
/// `text/plain` body otherwise (e.g. 204 and the synthesized `OPTIONS`
/// responses).
pub fn reply(status: StatusCode, body: Option<Value>) -> Response {
    match body {
        Some(value) => (status, Json(value)).into_response(),
        None => (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "",
        )
            .into_response(),
    }
}
