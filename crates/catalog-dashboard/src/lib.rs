//! Product catalog dashboard.
//!
//! A server-rendered product grid with an add form, search, sort, detail
//! and edit pages, plus a small JSON API and structured export. Products
//! live in memory; search and ordering run on `catalog-seeker`'s
//! substring matcher and stable merge sort.
//!
//! # Example
//!
//! ```ignore
//! use catalog_dashboard::{CatalogServer, InMemoryProductStore, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = CatalogServer::new(ServerConfig::default(), InMemoryProductStore::new()).unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod product;
pub mod render;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod views;

pub use catalog::{browse, CatalogPage, SortOption};
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use product::{Product, ProductForm, ProductInput};
pub use state::AppState;
pub use store::{InMemoryProductStore, ResourceQuery, ResourceStore, StoreError};
pub use telemetry::{init_logging, TelemetryConfig};

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::render::RenderError;

/// Catalog HTTP server
pub struct CatalogServer {
    state: Arc<AppState>,
    router: Router,
}

impl CatalogServer {
    pub fn new(config: ServerConfig, store: InMemoryProductStore) -> std::result::Result<Self, RenderError> {
        let state = Arc::new(AppState::new(config, store)?);
        let router = routes::build_router(state.clone());
        Ok(Self { state, router })
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the router for testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until Ctrl-C.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let addr = self.state.config.listen_addr;
        let listener = TcpListener::bind(addr).await?;

        let products = self.state.store.len().unwrap_or_default();
        info!(addr = %addr, products, "catalog dashboard listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
