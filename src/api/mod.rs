// API module entry
// Mock auth and analytics endpoints for the demo dashboard

mod handlers;
pub mod mock;
mod response;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;
use handlers::AnalyticsResource;

// Re-export public helpers
pub use response::*;

/// API route handler
///
/// Dispatches to handler functions based on request path and method.
/// Every path here is an exact string match against a fixed route table.
pub async fn handle_api_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path();
    let method = req.method().clone();

    match (method, path) {
        // Demo login: fixed credential check, canned token
        (Method::POST, "/api/auth/login") => handlers::handle_login(req, state).await,
        // Current user: bearer presence check only
        (Method::GET, "/api/auth/me") => handlers::handle_me(req, state).await,
        // Analytics slices of the constant mock stats
        (Method::GET, "/api/analytics/dashboard") => {
            handlers::handle_analytics(state, AnalyticsResource::Dashboard).await
        }
        (Method::GET, "/api/analytics/trends") => {
            handlers::handle_analytics(state, AnalyticsResource::Trends).await
        }
        (Method::GET, "/api/analytics/breakdown") => {
            handlers::handle_analytics(state, AnalyticsResource::Breakdown).await
        }
        (Method::GET, "/api/analytics/agents") => {
            handlers::handle_analytics(state, AnalyticsResource::Agents).await
        }
        (Method::GET, "/api/analytics/sla") => {
            handlers::handle_analytics(state, AnalyticsResource::Sla).await
        }
        // Unknown API route
        _ => {
            logger::log_api_request(req.method().as_str(), path, 404);
            Ok(not_found())
        }
    }
}
