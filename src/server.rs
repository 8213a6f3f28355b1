//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()` — no new connections are made.
//! 2. Tells every open connection to finish its in-flight request and close.
//!    Idle keep-alive connections close right away.
//! 3. Waits up to [`DRAIN_TIMEOUT`] for them, aborts whatever is left, and
//!    returns from [`Server::serve`], which lets `main` exit cleanly.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::router::Router;

/// How long in-flight requests get to finish after a shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// The HTTP server.
pub struct Server {
    host: String,
    port: u16,
}

impl Server {
    /// Configures the server to bind to `host:port` when [`serve`](Server::serve)
    /// is called. `host` may be a name such as `localhost`; it is resolved
    /// when the listener is opened.
    ///
    /// ```rust,no_run
    /// use spider_api::Server;
    /// let server = Server::bind("0.0.0.0", 5000);
    /// ```
    pub fn bind(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops accepting when `signal`
    /// resolves instead of on an OS signal.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;
        let local = listener.local_addr()?;

        let router = Arc::new(router);

        info!(addr = %local, "spider-api listening");

        // HTTP/1.1 or HTTP/2, whatever the client negotiates.
        let builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Shutdown is checked first so a SIGTERM stops accepting
                // even while connections are still queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move {
                            let res = router.handle(req).await;
                            Ok::<_, std::convert::Infallible>(res.into_inner())
                        }
                    });

                    let conn = graceful.watch(builder.serve_connection(io, svc).into_owned());

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet stays bounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(listener);

        tokio::select! {
            () = graceful.shutdown() => {}
            () = tokio::time::sleep(DRAIN_TIMEOUT) => {
                warn!(in_flight = tasks.len(), "drain timed out, aborting connections");
                tasks.abort_all();
            }
        }
        while tasks.join_next().await.is_some() {}

        info!("spider-api stopped");
        Ok(())
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C) the process receives.
/// On Windows only Ctrl-C is available.
///
/// If a handler cannot be installed, that arm never fires and the error is
/// logged; the other signal still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
