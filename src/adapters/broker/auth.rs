//! Broker OAuth Credentials - Basic Header Encoding
//!
//! Holds the OAuth client id/secret pair and the registered redirect
//! URI. Credentials come from environment variables (BROKER_CLIENT_ID,
//! BROKER_CLIENT_SECRET, BROKER_REDIRECT_URI), loaded from `.env` and
//! never from a committed file.

use anyhow::{Context, Result};
use base64::Engine;

/// OAuth client credentials for the brokerage identity provider.
pub struct OAuthCredentials {
    /// Client id from BROKER_CLIENT_ID.
    client_id: String,
    /// Client secret from BROKER_CLIENT_SECRET (only ever sent inside
    /// the Basic header).
    client_secret: String,
    /// Registered redirect URI from BROKER_REDIRECT_URI.
    redirect_uri: String,
}

impl OAuthCredentials {
    /// Load credentials from environment variables.
    ///
    /// Required env vars: BROKER_CLIENT_ID, BROKER_CLIENT_SECRET,
    /// BROKER_REDIRECT_URI.
    pub fn from_env() -> Result<Self> {
        let client_id =
            std::env::var("BROKER_CLIENT_ID").context("BROKER_CLIENT_ID not set")?;
        let client_secret =
            std::env::var("BROKER_CLIENT_SECRET").context("BROKER_CLIENT_SECRET not set")?;
        let redirect_uri =
            std::env::var("BROKER_REDIRECT_URI").context("BROKER_REDIRECT_URI not set")?;

        Ok(Self::new(client_id, client_secret, redirect_uri))
    }

    /// Build credentials directly (tests and alternate wiring).
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
        }
    }

    /// Client id for the authorize redirect.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Registered redirect URI.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// `Authorization: Basic` header value for the token endpoint.
    pub fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair)
        )
    }
}
