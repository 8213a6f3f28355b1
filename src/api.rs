//! Route table and the data-backed handlers.
//!
//! | Route              | Success                       | Failure                         |
//! |--------------------|-------------------------------|---------------------------------|
//! | `GET /api/health`  | `{"status":"healthy"}`        | —                               |
//! | `GET /api/stats`   | [`Stats`]                     | 500 `{"error":"No data available"}` |
//! | `GET /api/data`    | one object per row            | 500                             |
//! | `GET /api/spider`  | [`SpiderRow`] list            | 500, or 400 on a bad `doses` item |
//!
//! Every data handler reloads the file; there is no state between requests.

use std::sync::Arc;

use tracing::debug;

use crate::data::{DataSource, Table};
use crate::health;
use crate::request::Request;
use crate::response::{Json, Response};
use crate::router::Router;
use crate::spider::{SpiderQuery, SpiderRow, spider_rows};
use crate::stats::Stats;
use crate::status::Status;

pub const NO_DATA: &str = "No data available";

/// Builds the application router over `source`.
pub fn router(source: DataSource) -> Router {
    let source = Arc::new(source);
    let stats_source = Arc::clone(&source);
    let data_source = Arc::clone(&source);

    Router::new()
        .get("/api/health", health::health)
        .get("/api/stats", move |req: Request| stats(Arc::clone(&stats_source), req))
        .get("/api/data", move |req: Request| data(Arc::clone(&data_source), req))
        .get("/api/spider", move |req: Request| spider(Arc::clone(&source), req))
}

/// `GET /api/stats`
pub async fn stats(source: Arc<DataSource>, _req: Request) -> Result<Json<Stats>, Response> {
    let table = load(&source).await?;
    Ok(Json(Stats::compute(&table)))
}

/// `GET /api/data`
pub async fn data(source: Arc<DataSource>, _req: Request) -> Result<Json<Table>, Response> {
    load(&source).await.map(Json)
}

/// `GET /api/spider?arms=..&doses=..&tumor_types=..`
///
/// The query is validated before the file is read, so a bad `doses` item is
/// a `400` whether or not data is available.
pub async fn spider(source: Arc<DataSource>, req: Request) -> Result<Json<Vec<SpiderRow>>, Response> {
    let query = SpiderQuery::from_request(&req).map_err(|e| {
        debug!(path = req.path(), "rejected spider query: {e}");
        Response::error(Status::BadRequest, &e.to_string())
    })?;

    let table = load(&source).await?;
    Ok(Json(spider_rows(&table, &query)))
}

/// The current table, or the `500` every data route answers when it is empty.
async fn load(source: &DataSource) -> Result<Table, Response> {
    let table = source.load_async().await;
    if table.is_empty() {
        return Err(Response::error(Status::InternalServerError, NO_DATA));
    }
    Ok(table)
}
