//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. The
//! router is also the in-process entry point: [`Router::handle`] runs a full
//! request through CORS, tracing and dispatch without touching a socket.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use matchit::Router as MatchitRouter;
use tracing::Instrument;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{cors, trace};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or collides with one already
    /// registered for `method`. Routes are fixed at start-up, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Shorthand for `on(Method::Get, path, handler)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    /// Runs one request through the middleware stack and the matched handler.
    ///
    /// The body is discarded unread; every route is a `GET`.
    pub async fn handle<B>(&self, req: http::Request<B>) -> Response {
        let (parts, _) = req.into_parts();
        let span = trace::span(&parts.method, parts.uri.path());

        async move {
            let started = Instant::now();
            let mut res = self.route(parts).await;
            cors::apply(&mut res);
            trace::record(&res, started.elapsed());
            res
        }
        .instrument(span)
        .await
    }

    async fn route(&self, parts: http::request::Parts) -> Response {
        if parts.method == http::Method::OPTIONS {
            return cors::preflight(&parts.headers);
        }

        let path = parts.uri.path();
        let method = Method::try_from(&parts.method).ok();
        let handler = method.and_then(|m| {
            // `HEAD` runs the `GET` handler when it has no route of its own.
            self.lookup(m, path)
                .or_else(|| (m == Method::Head).then(|| self.lookup(Method::Get, path)).flatten())
        });

        let res = match handler {
            Some(handler) => handler.call(Request::new(&parts)).await,
            None => self.unmatched(path),
        };
        if method == Some(Method::Head) { res.strip_body() } else { res }
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Option<BoxedHandler> {
        let matched = self.routes.get(&method)?.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }

    /// Methods registered for `path`, sorted by wire name. `HEAD` is implied
    /// by `GET`.
    pub(crate) fn allowed(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        if methods.contains(&Method::Get) && !methods.contains(&Method::Head) {
            methods.push(Method::Head);
        }
        methods.sort_by_key(|m| m.as_str());
        methods
    }

    /// `405` with an `allow` header when the path exists under another
    /// method, `404` otherwise.
    fn unmatched(&self, path: &str) -> Response {
        let allowed = self.allowed(path);
        if allowed.is_empty() {
            return Response::error(Status::NotFound, "Not found");
        }
        let allow = allowed.iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mut res = Response::error(Status::MethodNotAllowed, "Method not allowed");
        res.set_header("allow", &allow);
        res
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
