//! HTTP status codes the API answers with.
//!
//! ```rust
//! use spider_api::{Response, Status};
//!
//! Response::status(Status::NoContent);
//! Response::builder()
//!     .status(Status::BadRequest)
//!     .json_value(&serde_json::json!({"error": "invalid dose value: 'x'"}));
//! ```

/// The subset of IANA status codes this service produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    NoContent,           // 204
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::NoContent           => 204,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        // Every variant maps to a registered code, so the fallback is unreachable.
        http::StatusCode::from_u16(s.into()).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}
