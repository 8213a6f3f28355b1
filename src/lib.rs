//! # spider-api
//!
//! A small JSON API over a clinical-trial tumor-response CSV file.
//!
//! | Route              | Returns                                           |
//! |--------------------|---------------------------------------------------|
//! | `GET /api/health`  | `{"status":"healthy"}`                            |
//! | `GET /api/stats`   | distinct patients, arms, dose levels, row count   |
//! | `GET /api/data`    | every row as a JSON object                        |
//! | `GET /api/spider`  | filtered, sorted per-patient series for a spider plot |
//!
//! The file is read again on every data request; nothing is cached and no
//! state is shared between requests. A missing or unreadable file is logged
//! and answered with `500 {"error":"No data available"}`. Missing cells are
//! always JSON `null`.
//!
//! Underneath sits a minimal hyper-based framework: a radix-tree
//! [`Router`], type-erased async handlers, permissive CORS and a
//! [`Server`] with graceful shutdown.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use spider_api::{Config, DataSource, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), spider_api::Error> {
//!     let config = Config::from_env()?;
//!     let app = api::router(DataSource::new(&config.csv_path));
//!     Server::bind(config.host, config.port).serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod data;
pub mod health;
pub mod middleware;
pub mod spider;
pub mod stats;

pub use config::Config;
pub use data::DataSource;
pub use error::{Error, LoadError, QueryError};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
