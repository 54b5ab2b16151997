//! Token Gateway Port - OAuth Forwarding Interface
//!
//! Defines the trait for the thin OAuth glue against the brokerage
//! identity provider: authorize-URL construction plus
//! authorization-code and refresh-token exchange. Broker token
//! responses are forwarded verbatim as JSON, never reshaped.

use async_trait::async_trait;

use super::market_data::BrokerError;

/// Trait for the broker's OAuth2 endpoints.
#[async_trait]
pub trait TokenGateway: Send + Sync + 'static {
    /// Broker authorize endpoint with client id, redirect URI, and the
    /// read-only scope already applied.
    fn authorize_url(&self) -> String;

    /// Exchange an authorization code for a token set.
    async fn exchange_code(&self, code: &str) -> Result<serde_json::Value, BrokerError>;

    /// Exchange a refresh token for a fresh token set.
    async fn refresh(&self, refresh_token: &str) -> Result<serde_json::Value, BrokerError>;
}
