//! Logging setup.
//!
//! `RUST_LOG` wins when set; otherwise `LOG_LEVEL`, then the configured
//! `--log-level`. `LOG_FORMAT=compact` switches to single-line output and
//! `LOG_FORMAT=json` to one JSON object per event.

use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ServerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Compact,
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Primary log filter (RUST_LOG env var)
    pub log_filter: String,
    /// Fallback log level if RUST_LOG not set
    pub default_level: String,
    pub log_format: LogFormat,
}

impl TelemetryConfig {
    pub fn with_server_config(server_config: &ServerConfig) -> Self {
        let default_level =
            env::var("LOG_LEVEL").unwrap_or_else(|_| server_config.log_level.clone());
        Self::from_env_with_defaults(default_level)
    }

    fn from_env_with_defaults(default_level: String) -> Self {
        Self {
            log_filter: env::var("RUST_LOG").unwrap_or_default(),
            default_level,
            log_format: LogFormat::from_env_value(&env::var("LOG_FORMAT").unwrap_or_default()),
        }
    }

    /// The filter directive that will be installed.
    pub fn effective_filter(&self) -> &str {
        if self.log_filter.is_empty() {
            &self.default_level
        } else {
            &self.log_filter
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_env_with_defaults(env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))
    }
}

/// Installs the global subscriber.
///
/// Safe to call multiple times - will only initialize once.
pub fn init_logging(config: &TelemetryConfig) {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!("tracing subscriber already initialized, skipping");
        return;
    }

    let filter = EnvFilter::new(config.effective_filter());

    let fmt_layer = match config.log_format {
        LogFormat::Human => tracing_subscriber::fmt::layer().with_target(true).boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer().compact().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .boxed(),
    };

    // try_init: another thread may have won the race since has_been_set().
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_values() {
        assert_eq!(LogFormat::from_env_value("COMPACT"), LogFormat::Compact);
        assert_eq!(LogFormat::from_env_value(" json "), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(""), LogFormat::Human);
        assert_eq!(LogFormat::from_env_value("pretty"), LogFormat::Human);
    }

    #[test]
    fn test_effective_filter_prefers_rust_log() {
        let mut config = TelemetryConfig {
            log_filter: String::new(),
            default_level: "warn".into(),
            log_format: LogFormat::Human,
        };
        assert_eq!(config.effective_filter(), "warn");
        config.log_filter = "catalog_dashboard=debug".into();
        assert_eq!(config.effective_filter(), "catalog_dashboard=debug");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        let config = TelemetryConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
