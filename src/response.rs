//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] (or return a [`Json`] value) and the server
//! turns it into a hyper response. JSON is the only body format the API
//! speaks.

use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::status::Status;

const JSON: &str = "application/json";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use spider_api::{Response, Status};
///
/// Response::json_value(&serde_json::json!({"status": "healthy"}));
/// Response::status(Status::NoContent);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use spider_api::{Response, Status};
///
/// Response::builder()
///     .status(Status::MethodNotAllowed)
///     .header("allow", "GET")
///     .json_value(&serde_json::json!({"error": "Method not allowed"}));
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: u16,
}

impl Response {
    /// `200 OK` — `application/json`, serialised from any [`Serialize`] value.
    ///
    /// A serialisation failure is logged and answered with a bare `500`.
    pub fn json_value<T: Serialize + ?Sized>(value: &T) -> Self {
        Self::builder().json_value(value)
    }

    /// `{"error": message}` with the given status.
    pub fn error(code: Status, message: &str) -> Self {
        Self::builder()
            .status(code)
            .json_value(&serde_json::json!({ "error": message }))
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code.into() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// First header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets `name`, replacing any existing header of the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    /// Drops the body, keeping status and headers. Used to answer `HEAD`.
    pub(crate) fn strip_body(mut self) -> Self {
        self.body.clear();
        self
    }

    /// Converts into the hyper response type written to the connection.
    ///
    /// A header that is not valid on the wire turns the whole response into
    /// a bare `500`, which is logged.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match builder.body(Full::new(Bytes::from(self.body))) {
            Ok(res) => res,
            Err(e) => {
                error!("invalid response head: {e}");
                let mut res = http::Response::new(Full::new(Bytes::new()));
                *res.status_mut() = Status::InternalServerError.into();
                res
            }
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method — you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body serialised from `value`.
    pub fn json_value<T: Serialize + ?Sized>(self, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => {
                let mut headers = vec![("content-type".to_owned(), JSON.to_owned())];
                headers.extend(self.headers);
                Response { body, headers, status: self.status }
            }
            Err(e) => {
                error!("failed to serialise response body: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }

    /// Terminate with no body (e.g. `Status::NoContent`).
    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// `200 OK` JSON body serialised from the wrapped value.
///
/// ```rust
/// use spider_api::{Json, Request};
///
/// async fn health(_req: Request) -> Json<serde_json::Value> {
///     Json(serde_json::json!({ "status": "healthy" }))
/// }
/// ```
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response { Response::json_value(&self.0) }
}

/// Handlers return `Result<Json<T>, Response>` and bail out early with `?`
/// or `return Err(..)` on the error path.
impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}
