//! Per-request tracing.
//!
//! Each request runs inside an `http` span carrying its method and path; a
//! single event on completion records status and latency. Server errors log
//! at `warn`, everything else at `debug` so `DEBUG=false` keeps the log quiet.

use std::time::Duration;

use tracing::{Span, debug, info_span, warn};

use crate::response::Response;

pub fn span(method: &http::Method, path: &str) -> Span {
    info_span!("http", %method, path = %path)
}

pub fn record(res: &Response, elapsed: Duration) {
    let status = res.status_code();
    let latency_ms = elapsed.as_secs_f64() * 1_000.0;
    if status >= 500 {
        warn!(status, latency_ms, "request failed");
    } else {
        debug!(status, latency_ms, "request served");
    }
}
