//! Catalog dashboard server
//!
//! Run with: `cargo run -p catalog-dashboard -- --help`

use anyhow::Context;
use clap::Parser;
use catalog_dashboard::{
    telemetry::{init_logging, TelemetryConfig},
    CatalogServer, InMemoryProductStore, ServerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    let telemetry_config = TelemetryConfig::with_server_config(&config);
    init_logging(&telemetry_config);

    let store = match &config.seed {
        Some(path) => {
            let inputs = InMemoryProductStore::load_seed(path)
                .with_context(|| format!("loading seed products from {}", path.display()))?;
            InMemoryProductStore::with_products(inputs).context("seed file holds an invalid product")?
        }
        None => InMemoryProductStore::new(),
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        seed = ?config.seed,
        currency = %config.currency,
        log_format = ?telemetry_config.log_format,
        "Starting catalog dashboard"
    );

    let server = CatalogServer::new(config, store).context("compiling page templates")?;
    server.run().await.context("serving HTTP")
}
