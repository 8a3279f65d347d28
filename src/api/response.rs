// API response utility functions module

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;

/// Build JSON response from a serializable value
#[allow(clippy::unnecessary_wraps)]
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error")))));
        }
    };

    Ok(raw_json_response(status, Bytes::from(json)))
}

/// Build JSON response from pre-serialized bytes
///
/// Used for the mock payloads, which must be byte-identical on every call.
pub fn raw_json_response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 401 Unauthorized response
pub fn unauthorized(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "success": false,
        "message": message
    });
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Unauthorized"))))
}

/// 400 Bad Request response
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "success": false,
        "message": message
    });
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Bad Request"))))
}

/// 404 Not Found response for unknown API paths
pub fn not_found() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(
            r#"{"error":"Not Found","available_endpoints":["/api/auth/login","/api/auth/me","/api/analytics/dashboard","/api/analytics/trends","/api/analytics/breakdown","/api/analytics/agents","/api/analytics/sla"]}"#,
        )))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Not Found"))))
}
