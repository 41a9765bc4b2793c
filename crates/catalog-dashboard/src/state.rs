//! Shared application state.

use crate::config::ServerConfig;
use crate::render::{MiniJinjaEngine, RenderError};
use crate::store::InMemoryProductStore;

/// State handed to every handler behind an `Arc`.
pub struct AppState {
    pub config: ServerConfig,
    pub store: InMemoryProductStore,
    pub engine: MiniJinjaEngine,
}

impl AppState {
    /// Builds the state, compiling the page templates for `config.currency`.
    pub fn new(config: ServerConfig, store: InMemoryProductStore) -> Result<Self, RenderError> {
        let engine = MiniJinjaEngine::with_builtin_templates(&config.currency)?;
        Ok(Self {
            config,
            store,
            engine,
        })
    }
}
