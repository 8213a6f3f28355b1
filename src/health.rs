//! Health-check handler.
//!
//! `GET /api/health` answers `200 {"status":"healthy"}` without touching the
//! data file, so it stays green even when the dataset is unavailable.

use serde::Serialize;

use crate::{Json, Request};

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness handler. If the process can answer HTTP at all, it is healthy.
pub async fn health(_req: Request) -> Json<Health> {
    Json(Health { status: "healthy" })
}
