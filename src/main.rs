//! spider-api server binary.
//!
//! ```text
//! CSV_PATH=/data/spiderplot.csv HOST=0.0.0.0 PORT=5000 DEBUG=false spider-api
//! curl 'http://localhost:5000/api/spider?arms=A&doses=10,20'
//! ```

use anyhow::Context;
use spider_api::{Config, DataSource, Server, api};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("reading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        csv_path = %config.csv_path.display(),
        debug = config.debug,
        "starting spider-api"
    );

    let app = api::router(DataSource::new(&config.csv_path));

    Server::bind(config.host.as_str(), config.port)
        .serve(app)
        .await
        .with_context(|| format!("serving on {}:{}", config.host, config.port))
}
