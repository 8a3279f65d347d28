// Auth and analytics handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use super::mock;
use super::response::{bad_request, json_response, raw_json_response, unauthorized};
use crate::config::{AppState, DemoConfig};
use crate::logger;

/// Analytics payload selector, one variant per endpoint
#[derive(Debug, Clone, Copy)]
pub enum AnalyticsResource {
    Dashboard,
    Trends,
    Breakdown,
    Agents,
    Sla,
}

impl AnalyticsResource {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/api/analytics/dashboard",
            Self::Trends => "/api/analytics/trends",
            Self::Breakdown => "/api/analytics/breakdown",
            Self::Agents => "/api/analytics/agents",
            Self::Sla => "/api/analytics/sla",
        }
    }
}

/// Login request body
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
///
/// Exact string match against the demo credentials; the issued token is a
/// prefix plus the current unix-millis timestamp and carries no claims.
pub async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    use http_body_util::BodyExt;

    let whole_body = if let Ok(collected) = req.collect().await {
        collected.to_bytes()
    } else {
        logger::log_api_request("POST", "/api/auth/login", 400);
        return Ok(bad_request("Failed to read request body"));
    };

    process_login(&state.config.demo, &whole_body)
}

/// Parse the login body and build the response
///
/// Separated from body collection so the 400/401/200 branches can be
/// exercised directly.
fn process_login(demo: &DemoConfig, body: &[u8]) -> Result<Response<Full<Bytes>>, Infallible> {
    let login: LoginRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_api_request("POST", "/api/auth/login", 400);
            return Ok(bad_request(&format!("Invalid JSON: {e}")));
        }
    };

    if !credentials_match(demo, &login.email, &login.password) {
        logger::log_api_request("POST", "/api/auth/login", 401);
        return Ok(unauthorized("Invalid email or password"));
    }

    let token = issue_token(&demo.token_prefix);
    logger::log_api_request("POST", "/api/auth/login", 200);

    let response = serde_json::json!({
        "success": true,
        "token": token,
        "user": mock::demo_user()
    });
    json_response(StatusCode::OK, &response)
}

/// GET /api/auth/me
///
/// The demo only checks that a bearer header is present; the token value is
/// never inspected.
pub async fn handle_me(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    if !bearer_present(authorization) {
        logger::log_api_request("GET", "/api/auth/me", 401);
        return Ok(unauthorized("No token provided"));
    }

    logger::log_api_request("GET", "/api/auth/me", 200);
    Ok(raw_json_response(StatusCode::OK, state.mock.me.clone()))
}

/// GET /api/analytics/*
///
/// Returns the pre-serialized slice of the mock stats, byte-for-byte
/// identical on every call.
pub async fn handle_analytics(
    state: Arc<AppState>,
    resource: AnalyticsResource,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let payload = match resource {
        AnalyticsResource::Dashboard => state.mock.dashboard.clone(),
        AnalyticsResource::Trends => state.mock.trends.clone(),
        AnalyticsResource::Breakdown => state.mock.breakdown.clone(),
        AnalyticsResource::Agents => state.mock.agents.clone(),
        AnalyticsResource::Sla => state.mock.sla.clone(),
    };

    logger::log_api_request("GET", resource.path(), 200);
    Ok(raw_json_response(StatusCode::OK, payload))
}

/// Exact match against the single demo account
pub fn credentials_match(demo: &DemoConfig, email: &str, password: &str) -> bool {
    email == demo.email && password == demo.password
}

/// Check for an `Authorization: Bearer ...` header with a non-empty token
pub fn bearer_present(authorization: Option<&str>) -> bool {
    authorization
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty())
}

/// Issue a demo token: prefix plus unix-millis issue time
pub fn issue_token(prefix: &str) -> String {
    format!("{prefix}{}", chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_config() -> DemoConfig {
        DemoConfig {
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
            token_prefix: "demo-token-".to_string(),
        }
    }

    #[test]
    fn test_credentials_exact_match_only() {
        let demo = demo_config();
        assert!(credentials_match(&demo, "admin@example.com", "admin123"));
        assert!(!credentials_match(&demo, "admin@example.com", "admin1234"));
        assert!(!credentials_match(&demo, "Admin@Example.com", "admin123"));
        assert!(!credentials_match(&demo, "", ""));
    }

    #[test]
    fn test_issue_token_prefix() {
        let token = issue_token("demo-token-");
        assert!(token.starts_with("demo-token-"));
        // The remainder is a unix-millis timestamp
        assert!(token["demo-token-".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_bearer_present() {
        assert!(bearer_present(Some("Bearer demo-token-123")));
        assert!(bearer_present(Some("Bearer anything")));
        assert!(!bearer_present(Some("Bearer ")));
        assert!(!bearer_present(Some("Basic dXNlcjpwYXNz")));
        assert!(!bearer_present(Some("demo-token-123")));
        assert!(!bearer_present(None));
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        use http_body_util::BodyExt;
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_malformed_json_returns_400() {
        let resp = process_login(&demo_config(), b"not json at all").unwrap();
        assert_eq!(resp.status(), 400);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_login_wrong_credentials_returns_401() {
        let body = br#"{"email":"admin@example.com","password":"wrong"}"#;
        let resp = process_login(&demo_config(), body).unwrap();
        assert_eq!(resp.status(), 401);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_demo_credentials_returns_token() {
        let body = br#"{"email":"admin@example.com","password":"admin123"}"#;
        let resp = process_login(&demo_config(), body).unwrap();
        assert_eq!(resp.status(), 200);
        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        assert!(json["token"]
            .as_str()
            .unwrap()
            .starts_with("demo-token-"));
        assert_eq!(json["user"]["email"], "admin@example.com");
    }

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        let login: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(login.email.is_empty());
        assert!(login.password.is_empty());
        assert!(!credentials_match(
            &demo_config(),
            &login.email,
            &login.password
        ));
    }
}
