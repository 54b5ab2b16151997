//! Broker HTTP Client - Market Data and OAuth Token Endpoints
//!
//! Wraps reqwest for all brokerage API interactions: the chains query
//! (implements the `MarketData` port) and the OAuth authorize/token
//! endpoints (implements the `TokenGateway` port). Single attempt per
//! request; the only resilience is the configured timeout.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

use crate::config::BrokerConfig;
use crate::domain::raw::RawChainResponse;
use crate::ports::market_data::{BrokerError, MarketData};
use crate::ports::token_gateway::TokenGateway;

use super::auth::OAuthCredentials;

/// OAuth scope requested for the dashboard; chain data is read-only.
const OAUTH_SCOPE: &str = "readonly";

/// Brokerage REST client backing both broker-facing ports.
pub struct BrokerClient {
    /// Underlying HTTP client.
    http: Client,
    /// OAuth client credentials.
    credentials: OAuthCredentials,
    /// Chains endpoint, precomputed from config.
    chains_url: Url,
    /// Token endpoint, precomputed from config.
    token_url: Url,
    /// Authorize endpoint with static query parameters applied.
    authorize_url: Url,
}

impl BrokerClient {
    /// Create a new broker client from validated configuration.
    pub fn new(credentials: OAuthCredentials, config: &BrokerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        let market_base = config.market_data_url.trim_end_matches('/');
        let oauth_base = config.oauth_url.trim_end_matches('/');

        let chains_url = Url::parse(&format!("{market_base}/chains"))
            .context("Invalid market-data base URL")?;
        let token_url =
            Url::parse(&format!("{oauth_base}/token")).context("Invalid OAuth base URL")?;

        let mut authorize_url = Url::parse(&format!("{oauth_base}/authorize"))
            .context("Invalid OAuth base URL")?;
        authorize_url
            .query_pairs_mut()
            .append_pair("client_id", credentials.client_id())
            .append_pair("redirect_uri", credentials.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", OAUTH_SCOPE);

        Ok(Self {
            http,
            credentials,
            chains_url,
            token_url,
            authorize_url,
        })
    }

    /// POST to the token endpoint with Basic credentials and form
    /// parameters, forwarding the broker's JSON verbatim.
    async fn token_request(
        &self,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, BrokerError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .header("Authorization", self.credentials.basic_authorization())
            .header("Accept", "application/json")
            .form(params)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = read_json_body(response).await;
        if status.is_success() {
            Ok(body)
        } else {
            warn!(status = %status, "Token endpoint rejected the request");
            Err(BrokerError::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl MarketData for BrokerClient {
    async fn fetch_chain(
        &self,
        symbol: &str,
        access_token: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RawChainResponse, BrokerError> {
        let mut url = self.chains_url.clone();
        url.query_pairs_mut()
            .append_pair("symbol", &symbol.to_uppercase())
            .append_pair("contractType", "ALL")
            .append_pair("includeQuotes", "true")
            .append_pair("fromDate", &from.format("%Y-%m-%d").to_string())
            .append_pair("toDate", &to.format("%Y-%m-%d").to_string());

        debug!(symbol, %url, "Fetching options chain");

        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {access_token}"))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = read_json_body(response).await;
            warn!(symbol, status = %status, "Chain request rejected by broker");
            return Err(BrokerError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<RawChainResponse>().await.map_err(transport)
    }
}

#[async_trait]
impl TokenGateway for BrokerClient {
    fn authorize_url(&self) -> String {
        self.authorize_url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<serde_json::Value, BrokerError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.credentials.redirect_uri()),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<serde_json::Value, BrokerError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}

fn transport(err: reqwest::Error) -> BrokerError {
    BrokerError::Transport(err.to_string())
}

/// Parse a response body as JSON, falling back to the raw text when
/// the broker does not return JSON.
async fn read_json_body(response: Response) -> serde_json::Value {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
}
