//! Server configuration

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Catalog dashboard configuration.
///
/// Every flag falls back to a `CATALOG_*` environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-dashboard")]
#[command(about = "Product catalog dashboard with search, sort and CRUD")]
#[command(version)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CATALOG_LISTEN_ADDR", default_value = "127.0.0.1:8080")]
    pub listen_addr: SocketAddr,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, env = "CATALOG_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// JSON file with an array of products to load at start-up
    #[arg(long, env = "CATALOG_SEED")]
    pub seed: Option<PathBuf>,

    /// Heading shown on every page
    #[arg(long, env = "CATALOG_PAGE_TITLE", default_value = "Products Management")]
    pub page_title: String,

    /// Prefix for formatted prices
    #[arg(long, env = "CATALOG_CURRENCY", default_value = "Rs.")]
    pub currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            log_level: "info".to_string(),
            seed: None,
            page_title: "Products Management".to_string(),
            currency: "Rs.".to_string(),
        }
    }
}
