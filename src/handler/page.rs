//! Dashboard page module
//!
//! Serves the embedded CRM dashboard document. The whole front end lives in
//! one HTML file with inline CSS and JavaScript; every non-API path returns
//! it so client-side navigation always lands on the app.

use crate::http::{self, cache};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

static PAGE: &str = include_str!("page.html");

/// Serve the dashboard HTML page with `ETag` revalidation
pub fn serve_dashboard(if_none_match: Option<&str>, is_head: bool) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(PAGE.as_bytes());

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::build_html_response(PAGE, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_html_document() {
        let resp = serve_dashboard(None, false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(PAGE.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_head_elides_body_but_keeps_length() {
        let resp = serve_dashboard(None, true);
        assert_eq!(resp.status(), 200);
        let length: usize = resp
            .headers()
            .get("Content-Length")
            .unwrap()
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(length, PAGE.len());
    }

    #[test]
    fn test_etag_revalidation() {
        let etag = cache::generate_etag(PAGE.as_bytes());
        let resp = serve_dashboard(Some(etag.as_str()), false);
        assert_eq!(resp.status(), 304);
    }
}
