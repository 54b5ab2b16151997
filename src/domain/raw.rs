//! Broker Chain Wire Schema
//!
//! Serde types for the raw options-chain payload returned by the
//! brokerage market-data API. The schema is an external contract:
//! every field the ranker does not consume is ignored on deserialize.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One raw option record within an expiration/strike bucket.
///
/// Every field is optional on the wire. Defaulting rules live in
/// `domain::chain`, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOptionQuote {
    /// Outstanding contracts at this strike/expiry.
    #[serde(rename = "openInterest")]
    pub open_interest: Option<i64>,
    /// Broker-computed fair-value premium.
    pub mark: Option<f64>,
    /// Last traded premium.
    pub last: Option<f64>,
    /// Implied volatility as reported by the broker.
    pub volatility: Option<f64>,
}

/// A strike bucket: the broker serializes either a single record or an
/// array of records, depending on the endpoint variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StrikeBucket {
    Many(Vec<RawOptionQuote>),
    One(RawOptionQuote),
}

impl StrikeBucket {
    /// First record in the bucket, if any.
    pub fn first(&self) -> Option<&RawOptionQuote> {
        match self {
            Self::Many(quotes) => quotes.first(),
            Self::One(quote) => Some(quote),
        }
    }
}

/// Expiration-date key (`"YYYY-MM-DD:dte"`) → strike string → records.
///
/// `BTreeMap` keeps iteration order deterministic, which the ranker's
/// tie-breaking relies on.
pub type ExpDateMap = BTreeMap<String, BTreeMap<String, StrikeBucket>>;

/// Raw chain response for one underlying symbol.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChainResponse {
    /// Spot price of the underlying at fetch time.
    #[serde(rename = "underlyingPrice")]
    pub underlying_price: Option<f64>,
    /// Calls keyed by expiration, then strike.
    #[serde(rename = "callExpDateMap", default)]
    pub call_exp_date_map: ExpDateMap,
    /// Puts keyed by expiration, then strike.
    #[serde(rename = "putExpDateMap", default)]
    pub put_exp_date_map: ExpDateMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_single_record_bucket() {
        let json = r#"{
            "underlyingPrice": 101.5,
            "callExpDateMap": {
                "2026-09-11:18": {
                    "105.0": {"openInterest": 120, "mark": 1.25, "volatility": 22.4}
                }
            }
        }"#;
        let raw: RawChainResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.underlying_price, Some(101.5));
        let bucket = &raw.call_exp_date_map["2026-09-11:18"]["105.0"];
        let quote = bucket.first().unwrap();
        assert_eq!(quote.open_interest, Some(120));
        assert_eq!(quote.mark, Some(1.25));
        assert!(quote.last.is_none());
    }

    #[test]
    fn test_deserialize_array_bucket_and_unknown_fields() {
        let json = r#"{
            "underlyingPrice": 99.0,
            "symbol": "SPY",
            "putExpDateMap": {
                "2026-09-04:11": {
                    "95.0": [
                        {"openInterest": 300, "last": 0.8, "delta": -0.2},
                        {"openInterest": 10, "last": 0.1}
                    ]
                }
            }
        }"#;
        let raw: RawChainResponse = serde_json::from_str(json).unwrap();
        let bucket = &raw.put_exp_date_map["2026-09-04:11"]["95.0"];
        let quote = bucket.first().unwrap();
        assert_eq!(quote.open_interest, Some(300));
        assert_eq!(quote.last, Some(0.8));
    }

    #[test]
    fn test_missing_maps_default_to_empty() {
        let raw: RawChainResponse = serde_json::from_str("{}").unwrap();
        assert!(raw.underlying_price.is_none());
        assert!(raw.call_exp_date_map.is_empty());
        assert!(raw.put_exp_date_map.is_empty());
    }
}
