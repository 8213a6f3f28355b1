//! Middleware layer.
//!
//! Cross-cutting concerns applied to every request by
//! [`Router::handle`](crate::Router::handle):
//!
//! - [`cors`] — permissive cross-origin headers and `OPTIONS` preflight
//! - [`trace`] — per-request span with method, path, status, latency

pub mod cors;
pub mod trace;
