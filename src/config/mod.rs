//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`. OAuth client
//! credentials are NOT here - they come from environment variables via
//! `.env` (see `adapters::broker::auth`), so secrets never land in a
//! committed file.

pub mod loader;

use serde::Deserialize;

use crate::domain::chain::ChainFilter;

/// Top-level service configuration.
///
/// Loaded from `config.toml` at startup and validated before the
/// server binds.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Brokerage API endpoints.
    pub broker: BrokerConfig,
    /// Chain filter/ranker parameters.
    #[serde(default)]
    pub chain: ChainFilter,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the dashboard API.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Brokerage API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Market-data REST base URL.
    pub market_data_url: String,
    /// OAuth base URL (authorize + token endpoints).
    pub oauth_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

// Default value functions for serde

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}
