//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, and dispatching. The route table is a fixed
//! set of exact path matches; everything else gets the dashboard page.

use crate::api;
use crate::config::AppState;
use crate::handler::page;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{HeaderMap, HeaderValue, SERVER};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);

    // Header values needed after the request body is consumed
    let user_agent = header_string(&req, "user-agent");
    let if_none_match = header_string(&req, "if-none-match");
    let http_version = version_label(req.version());

    let mut response =
        dispatch(req, &state, &method, &path, is_head, if_none_match.as_deref()).await?;
    set_server_header(response.headers_mut(), &state.config.http.server_name);

    if access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            method.to_string(),
            path.clone(),
        );
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_size(&response);
        entry.user_agent = user_agent;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method and path
async fn dispatch(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    method: &Method,
    path: &str,
    is_head: bool,
    if_none_match: Option<&str>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return Ok(resp);
    }

    // 2. Check body size
    let content_length = header_string(&req, "content-length");
    if let Some(resp) = check_body_size(content_length.as_deref(), state.config.http.max_body_size)
    {
        return Ok(resp);
    }

    // 3. Health check (highest priority, always fast)
    if path == "/health" {
        return build_health_response();
    }

    // 4. API routes (exact matches inside the api module)
    if path == "/api" || path.starts_with("/api/") {
        return api::handle_api_request(req, Arc::clone(state)).await;
    }

    // 5. Everything else: the embedded dashboard page
    Ok(page::serve_dashboard(if_none_match, is_head))
}

/// Check HTTP method and return appropriate response for unsupported methods
pub fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD | Method::POST => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header value and return 413 if exceeded
///
/// A missing or unparseable header skips the check; hyper enforces the
/// protocol-level limits.
pub fn check_body_size(
    content_length: Option<&str>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let size_str = content_length?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

/// GET /health - status plus a fresh timestamp on every call
fn build_health_response() -> Result<Response<Full<Bytes>>, Infallible> {
    let body = serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339()
    });
    api::json_response(StatusCode::OK, &body)
}

/// Attach the configured server name to every response
fn set_server_header(headers: &mut HeaderMap, server_name: &str) {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn body_size(response: &Response<Full<Bytes>>) -> usize {
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_methods_pass_through() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());
        assert!(check_http_method(&Method::POST, false).is_none());
    }

    #[test]
    fn test_options_gets_preflight() {
        let resp = check_http_method(&Method::OPTIONS, true).unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_options_without_cors() {
        let resp = check_http_method(&Method::OPTIONS, false).unwrap();
        assert_eq!(resp.status(), 204);
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_other_methods_rejected() {
        let resp = check_http_method(&Method::DELETE, false).unwrap();
        assert_eq!(resp.status(), 405);
        let resp = check_http_method(&Method::PUT, false).unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[test]
    fn test_body_size_over_limit_rejected() {
        let resp = check_body_size(Some("2048"), 1024).unwrap();
        assert_eq!(resp.status(), 413);
    }

    #[test]
    fn test_body_size_within_limit_passes() {
        assert!(check_body_size(Some("1024"), 1024).is_none());
        assert!(check_body_size(Some("0"), 1024).is_none());
    }

    #[test]
    fn test_body_size_invalid_or_missing_skips_check() {
        assert!(check_body_size(Some("not-a-number"), 1024).is_none());
        assert!(check_body_size(None, 1024).is_none());
    }

    #[test]
    fn test_server_header_applied() {
        let mut resp = Response::new(Full::new(Bytes::new()));
        set_server_header(resp.headers_mut(), "CaseDesk-Demo/0.1");
        assert_eq!(resp.headers().get("Server").unwrap(), "CaseDesk-Demo/0.1");
    }

    #[test]
    fn test_server_header_invalid_name_skipped() {
        let mut resp = Response::new(Full::new(Bytes::new()));
        set_server_header(resp.headers_mut(), "bad\nname");
        assert!(resp.headers().get("Server").is_none());
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
