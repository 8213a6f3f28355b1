//! Permissive cross-origin resource sharing.
//!
//! Any origin may read any response. Credentials are never allowed, so the
//! wildcard origin is always valid and `Vary: Origin` is not needed.

use http::HeaderMap;

use crate::response::Response;
use crate::status::Status;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, HEAD, OPTIONS";
/// Seconds a browser may cache a preflight answer.
pub const MAX_AGE: &str = "600";

/// Adds `access-control-allow-origin: *` to `res`.
pub fn apply(res: &mut Response) {
    res.set_header("access-control-allow-origin", ALLOW_ORIGIN);
}

/// `204` answer to an `OPTIONS` preflight.
///
/// Requested headers are echoed back; without the request header every
/// header is allowed.
pub fn preflight(headers: &HeaderMap) -> Response {
    let allow_headers = headers
        .get("access-control-request-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*");

    Response::builder()
        .status(Status::NoContent)
        .header("access-control-allow-methods", ALLOW_METHODS)
        .header("access-control-allow-headers", allow_headers)
        .header("access-control-max-age", MAX_AGE)
        .no_body()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_echoes_requested_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("access-control-request-headers", "content-type, x-id".parse().unwrap());
        let res = preflight(&headers);
        assert_eq!(res.status_code(), 204);
        assert_eq!(res.header("access-control-allow-headers"), Some("content-type, x-id"));
        assert_eq!(res.header("access-control-allow-methods"), Some(ALLOW_METHODS));
        assert!(res.header("access-control-allow-credentials").is_none());
        assert!(res.body().is_empty());
    }

    #[test]
    fn preflight_without_request_headers_allows_any() {
        let res = preflight(&HeaderMap::new());
        assert_eq!(res.header("access-control-allow-headers"), Some("*"));
    }
}
