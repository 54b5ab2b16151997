//! Market Data Port - Options-Chain Retrieval Interface
//!
//! Defines the trait for fetching raw options chains from the
//! brokerage market-data API, and the error taxonomy shared by every
//! broker-facing port.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::raw::RawChainResponse;

/// Failure modes when talking to the brokerage API.
///
/// No retries anywhere: every failure is surfaced to the caller
/// immediately.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The broker answered with a non-success status. The body is
    /// carried verbatim so callers can forward it as `details`.
    #[error("broker returned status {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },
    /// The request never produced a broker response (connect, timeout,
    /// or decode failure).
    #[error("broker request failed: {0}")]
    Transport(String),
}

/// Trait for fetching the raw options chain for one symbol.
///
/// The date range is explicit so callers control the fetch window and
/// the transformation downstream stays deterministic.
#[async_trait]
pub trait MarketData: Send + Sync + 'static {
    /// Fetch the raw chain for `symbol` over `[from, to]`,
    /// authenticated with the dashboard user's bearer token.
    async fn fetch_chain(
        &self,
        symbol: &str,
        access_token: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RawChainResponse, BrokerError>;
}
