//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use url::Url;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        bind = %config.server.bind_address,
        price_range = config.chain.price_range,
        top_per_side = config.chain.top_per_side,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Parseable broker URLs
/// - Positive filter parameters
/// - Non-empty bind address
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Server validation
    anyhow::ensure!(
        !config.server.bind_address.is_empty(),
        "Server bind_address must not be empty"
    );

    // Broker endpoint validation
    Url::parse(&config.broker.market_data_url).with_context(|| {
        format!(
            "broker.market_data_url is not a valid URL: {}",
            config.broker.market_data_url
        )
    })?;
    Url::parse(&config.broker.oauth_url).with_context(|| {
        format!(
            "broker.oauth_url is not a valid URL: {}",
            config.broker.oauth_url
        )
    })?;
    anyhow::ensure!(
        config.broker.timeout_seconds > 0,
        "broker.timeout_seconds must be positive"
    );

    // Chain filter validation
    anyhow::ensure!(
        config.chain.price_range > 0.0,
        "chain.price_range must be positive, got {}",
        config.chain.price_range
    );
    anyhow::ensure!(
        config.chain.min_open_interest >= 0,
        "chain.min_open_interest must be non-negative, got {}",
        config.chain.min_open_interest
    );
    anyhow::ensure!(
        config.chain.expiry_window_days >= 1,
        "chain.expiry_window_days must be at least 1"
    );
    anyhow::ensure!(
        config.chain.top_per_side >= 1,
        "chain.top_per_side must be at least 1"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(chain_section: &str) -> AppConfig {
        let toml = format!(
            r#"
            [server]
            bind_address = "127.0.0.1:3000"

            [broker]
            market_data_url = "https://api.broker.example/marketdata/v1"
            oauth_url = "https://api.broker.example/v1/oauth"
            {chain_section}
            "#
        );
        toml::from_str(&toml).unwrap()
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = sample("");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.broker.timeout_seconds, 30);
        assert_eq!(config.chain.price_range, 20.0);
        assert_eq!(config.chain.min_open_interest, 50);
        assert_eq!(config.chain.expiry_window_days, 21);
        assert_eq!(config.chain.top_per_side, 8);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_price_range() {
        let config = sample("[chain]\nprice_range = -5.0");
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_invalid_broker_url() {
        let mut config = sample("");
        config.broker.oauth_url = "not a url".to_string();
        assert!(validate_config(&config).is_err());
    }
}
