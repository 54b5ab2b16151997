//! HTTP Error Envelope - Taxonomy to Status Mapping
//!
//! Client input errors map to 4xx with a short machine-readable
//! reason, upstream broker failures propagate the broker's status with
//! its body attached as `details`, and everything unexpected is a 500.
//! Date-parsing failures inside the ranker never reach this layer;
//! they are recovered locally by dropping the offending expiration.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::ports::market_data::BrokerError;

/// Everything a dashboard route can answer with besides a success.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Access token required")]
    MissingAccessToken,
    #[error("Symbol is required")]
    MissingSymbol,
    #[error("Authorization code is required")]
    MissingCode,
    #[error("Refresh token is required")]
    MissingRefreshToken,
    /// Non-success answer from the broker, forwarded with its body.
    #[error("Broker API error")]
    Upstream {
        status: u16,
        details: serde_json::Value,
    },
    /// Transport or decoding failure on the chain request.
    #[error("Failed to fetch options data")]
    ChainFetch { symbol: String, details: String },
    /// Transport failure on a token request.
    #[error("Token request failed")]
    TokenFetch { details: String },
}

impl ApiError {
    /// Map a port-level broker failure for the chain route.
    pub fn from_chain_error(err: BrokerError, symbol: &str) -> Self {
        match err {
            BrokerError::Upstream { status, body } => Self::Upstream {
                status,
                details: body,
            },
            BrokerError::Transport(details) => Self::ChainFetch {
                symbol: symbol.to_string(),
                details,
            },
        }
    }

    /// Map a port-level broker failure for the token routes.
    pub fn from_token_error(err: BrokerError) -> Self {
        match err {
            BrokerError::Upstream { status, body } => Self::Upstream {
                status,
                details: body,
            },
            BrokerError::Transport(details) => Self::TokenFetch { details },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MissingAccessToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": self.to_string() }),
            ),
            Self::MissingSymbol | Self::MissingCode | Self::MissingRefreshToken => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            Self::Upstream { status, details } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": self.to_string(), "details": details }),
            ),
            Self::ChainFetch { symbol, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string(), "details": details, "symbol": symbol }),
            ),
            Self::TokenFetch { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string(), "details": details }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
