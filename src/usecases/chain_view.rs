//! Chain View - One Symbol Request End to End
//!
//! Fetches the raw chain through the `MarketData` port and hands it to
//! the pure ranker. The reference date drives both the outbound date
//! range and the expiry-window filter, so a request is reproducible
//! given the same date and payload.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::info;

use crate::domain::chain::{ChainFilter, ChainResult};
use crate::ports::market_data::{BrokerError, MarketData};

/// Days of expirations requested from the broker. One day wider than
/// the filter window so the last admissible expiration is always
/// present in the payload.
const FETCH_WINDOW_DAYS: u64 = 22;

/// Per-symbol chain snapshot workflow.
pub struct ChainView {
    market_data: Arc<dyn MarketData>,
    filter: ChainFilter,
}

impl ChainView {
    /// Wire the workflow with a market-data port and filter parameters.
    pub fn new(market_data: Arc<dyn MarketData>, filter: ChainFilter) -> Self {
        Self {
            market_data,
            filter,
        }
    }

    /// Fetch and rank the chain for one symbol.
    pub async fn snapshot(
        &self,
        symbol: &str,
        access_token: &str,
        reference_date: NaiveDate,
    ) -> Result<ChainResult, BrokerError> {
        let to = reference_date
            .checked_add_days(Days::new(FETCH_WINDOW_DAYS))
            .unwrap_or(reference_date);

        let raw = self
            .market_data
            .fetch_chain(symbol, access_token, reference_date, to)
            .await?;

        let result = self.filter.rank(&raw, symbol, reference_date);
        info!(
            symbol,
            calls = result.calls.len(),
            puts = result.puts.len(),
            underlying = result.underlying.price,
            "Chain snapshot ready"
        );
        Ok(result)
    }
}
