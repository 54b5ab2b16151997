//! Chain Filter/Ranker — The Core Transformation
//!
//! Turns a raw options-chain payload into a bounded, display-ready
//! snapshot: out-of-the-money calls and puts with high open interest,
//! deduplicated by strike and capped per side.
//!
//! Pure and deterministic: the "now" anchoring the expiry window is an
//! explicit `reference_date` parameter, never read from the clock.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::expiry::{format_expiry, parse_expiration_key};
use super::raw::{ExpDateMap, RawChainResponse, RawOptionQuote};

/// Side of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionType {
    Call,
    Put,
}

/// One display-ready option contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedOption {
    /// Side of the chain.
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Exercise price; unique within its side for a given result.
    pub strike: f64,
    /// Premium: mark, falling back to last, defaulting to 0.
    pub price: f64,
    /// Outstanding contracts — the ranking signal.
    #[serde(rename = "openInterest")]
    pub open_interest: i64,
    /// Short `month/day` expiry label, or `"N/A"`.
    pub expiry: String,
    /// Parsed expiration date; internal, never serialized.
    #[serde(skip)]
    pub expiry_date: NaiveDate,
    /// Implied volatility, defaulting to 0 when absent.
    #[serde(rename = "impliedVolatility")]
    pub implied_volatility: f64,
}

/// The underlying symbol and its spot price at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Underlying {
    pub symbol: String,
    pub price: f64,
}

/// Ranked, bounded chain snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainResult {
    pub calls: Vec<NormalizedOption>,
    pub puts: Vec<NormalizedOption>,
    pub underlying: Underlying,
}

/// Tunable filter/ranker parameters.
///
/// Defaults match the dashboard contract: ±20 strike window, open
/// interest strictly above 50, three-week expiry window, eight
/// contracts per side.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChainFilter {
    /// Symmetric strike window around the spot price.
    pub price_range: f64,
    /// Open-interest floor (exclusive) for a contract to survive.
    pub min_open_interest: i64,
    /// Expiry window length in days, inclusive on both ends.
    pub expiry_window_days: u64,
    /// Maximum surviving contracts per side.
    pub top_per_side: usize,
}

impl Default for ChainFilter {
    fn default() -> Self {
        Self {
            price_range: 20.0,
            min_open_interest: 50,
            expiry_window_days: 21,
            top_per_side: 8,
        }
    }
}

impl ChainFilter {
    /// Rank a raw chain into a bounded, display-ready snapshot.
    ///
    /// Calls keep strikes strictly above the spot price (up to
    /// `price_range` away), puts strictly below; each side is
    /// deduplicated by strike keeping the highest-open-interest
    /// occurrence, ranked by open interest, capped, then re-sorted by
    /// strike for display. Unparseable expirations are skipped, and a
    /// missing side map simply yields an empty side.
    pub fn rank(
        &self,
        raw: &RawChainResponse,
        symbol: &str,
        reference_date: NaiveDate,
    ) -> ChainResult {
        let current_price = raw.underlying_price.unwrap_or(0.0);
        let min_strike = current_price - self.price_range;
        let max_strike = current_price + self.price_range;
        let window_end = reference_date
            .checked_add_days(Days::new(self.expiry_window_days))
            .unwrap_or(reference_date);

        let calls = self.collect_side(
            &raw.call_exp_date_map,
            OptionType::Call,
            reference_date,
            window_end,
            |strike| strike > current_price && strike <= max_strike,
        );
        let puts = self.collect_side(
            &raw.put_exp_date_map,
            OptionType::Put,
            reference_date,
            window_end,
            |strike| strike < current_price && strike >= min_strike,
        );

        ChainResult {
            calls: self.top_ranked(calls, OptionType::Call),
            puts: self.top_ranked(puts, OptionType::Put),
            underlying: Underlying {
                symbol: symbol.to_string(),
                price: current_price,
            },
        }
    }

    /// Walk one side of the chain, collecting the best candidate per
    /// strike across all admissible expirations.
    fn collect_side<F>(
        &self,
        side: &ExpDateMap,
        option_type: OptionType,
        window_start: NaiveDate,
        window_end: NaiveDate,
        in_range: F,
    ) -> Vec<NormalizedOption>
    where
        F: Fn(f64) -> bool,
    {
        // Strikes are positive, so their bit patterns order and
        // deduplicate exactly like the numeric values.
        let mut best_by_strike: BTreeMap<u64, NormalizedOption> = BTreeMap::new();

        for (exp_key, strikes) in side {
            let Some(expiry_date) = parse_expiration_key(exp_key) else {
                continue;
            };
            if expiry_date < window_start || expiry_date > window_end {
                continue;
            }

            for (strike_key, bucket) in strikes {
                let Ok(strike) = strike_key.parse::<f64>() else {
                    continue;
                };
                if !in_range(strike) {
                    continue;
                }
                let Some(quote) = bucket.first() else {
                    continue;
                };
                let Some(open_interest) = quote.open_interest else {
                    continue;
                };
                if open_interest <= self.min_open_interest {
                    continue;
                }

                let candidate = NormalizedOption {
                    option_type,
                    strike,
                    price: premium(quote),
                    open_interest,
                    expiry: format_expiry(exp_key),
                    expiry_date,
                    implied_volatility: quote.volatility.unwrap_or(0.0),
                };

                // Expiration keys iterate in sorted order, so on an
                // open-interest tie the earlier expiration wins.
                match best_by_strike.entry(strike.to_bits()) {
                    Entry::Vacant(slot) => {
                        slot.insert(candidate);
                    }
                    Entry::Occupied(mut slot)
                        if candidate.open_interest > slot.get().open_interest =>
                    {
                        slot.insert(candidate);
                    }
                    Entry::Occupied(_) => {}
                }
            }
        }

        best_by_strike.into_values().collect()
    }

    /// Keep the top contracts by open interest, then re-sort the subset
    /// by strike for display: calls read low-to-high away from the
    /// money, puts high-to-low.
    fn top_ranked(
        &self,
        mut candidates: Vec<NormalizedOption>,
        option_type: OptionType,
    ) -> Vec<NormalizedOption> {
        candidates.sort_by(|a, b| b.open_interest.cmp(&a.open_interest));
        candidates.truncate(self.top_per_side);
        match option_type {
            OptionType::Call => candidates.sort_by(|a, b| a.strike.total_cmp(&b.strike)),
            OptionType::Put => candidates.sort_by(|a, b| b.strike.total_cmp(&a.strike)),
        }
        candidates
    }
}

/// Premium with the display-contract defaults: mark, then last, then 0.
///
/// A zero mark falls through to last, so a legitimate 0 and "absent"
/// are indistinguishable here. That looseness is part of the contract.
fn premium(quote: &RawOptionQuote) -> f64 {
    quote
        .mark
        .filter(|mark| *mark != 0.0)
        .or_else(|| quote.last.filter(|last| *last != 0.0))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::raw::StrikeBucket;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    fn quote(open_interest: i64) -> RawOptionQuote {
        RawOptionQuote {
            open_interest: Some(open_interest),
            mark: Some(1.25),
            last: Some(1.10),
            volatility: Some(22.4),
        }
    }

    /// Build one side map from (expiration key, strike, quote) triples.
    fn side(entries: &[(&str, &str, RawOptionQuote)]) -> ExpDateMap {
        let mut map = ExpDateMap::new();
        for (exp_key, strike, q) in entries {
            map.entry((*exp_key).to_string())
                .or_default()
                .insert((*strike).to_string(), StrikeBucket::One(q.clone()));
        }
        map
    }

    fn chain(price: f64, calls: ExpDateMap, puts: ExpDateMap) -> RawChainResponse {
        RawChainResponse {
            underlying_price: Some(price),
            call_exp_date_map: calls,
            put_exp_date_map: puts,
        }
    }

    #[test]
    fn test_call_above_price_kept_below_price_dropped() {
        let calls = side(&[
            ("2026-09-04:11", "110.0", quote(60)),
            ("2026-09-04:11", "95.0", quote(1000)),
        ]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].strike, 110.0);
        assert_eq!(result.calls[0].open_interest, 60);
        assert_eq!(result.underlying.symbol, "SPY");
        assert_eq!(result.underlying.price, 100.0);
    }

    #[test]
    fn test_put_below_price_kept_above_price_dropped() {
        let puts = side(&[
            ("2026-09-04:11", "92.0", quote(75)),
            ("2026-09-04:11", "104.0", quote(900)),
        ]);
        let raw = chain(100.0, ExpDateMap::new(), puts);
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.puts.len(), 1);
        assert_eq!(result.puts[0].strike, 92.0);
        assert!(result.calls.is_empty());
    }

    #[test]
    fn test_strike_window_bounds_are_inclusive() {
        let calls = side(&[
            ("2026-09-04:11", "120.0", quote(80)),
            ("2026-09-04:11", "120.5", quote(80)),
        ]);
        let puts = side(&[
            ("2026-09-04:11", "80.0", quote(80)),
            ("2026-09-04:11", "79.5", quote(80)),
        ]);
        let raw = chain(100.0, calls, puts);
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        // max_strike = 120 kept, 120.5 out; min_strike = 80 kept, 79.5 out.
        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].strike, 120.0);
        assert_eq!(result.puts.len(), 1);
        assert_eq!(result.puts[0].strike, 80.0);
    }

    #[test]
    fn test_open_interest_floor_is_exclusive() {
        let calls = side(&[
            ("2026-09-04:11", "105.0", quote(50)),
            ("2026-09-04:11", "106.0", quote(51)),
            (
                "2026-09-04:11",
                "107.0",
                RawOptionQuote {
                    open_interest: None,
                    mark: Some(1.0),
                    last: None,
                    volatility: None,
                },
            ),
        ]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].strike, 106.0);
    }

    #[test]
    fn test_dedup_keeps_highest_open_interest_expiry() {
        let calls = side(&[
            ("2026-08-28:4", "105.0", quote(60)),
            ("2026-09-11:18", "105.0", quote(200)),
        ]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].open_interest, 200);
        assert_eq!(result.calls[0].expiry, "9/11");
    }

    #[test]
    fn test_dedup_tie_keeps_earlier_expiration() {
        let calls = side(&[
            ("2026-08-28:4", "105.0", quote(200)),
            ("2026-09-11:18", "105.0", quote(200)),
        ]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].expiry, "8/28");
    }

    #[test]
    fn test_malformed_expiration_key_skips_whole_expiration() {
        let calls = side(&[
            ("definitely-not-a-date", "105.0", quote(500)),
            ("2026-09-04:11", "106.0", quote(80)),
        ]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].strike, 106.0);
    }

    #[test]
    fn test_expiry_window_is_inclusive_of_both_ends() {
        let calls = side(&[
            ("2026-08-24", "101.0", quote(80)),  // reference date itself
            ("2026-09-14", "102.0", quote(80)),  // reference + 21 days
            ("2026-09-15", "103.0", quote(80)),  // reference + 22 days, out
            ("2026-08-23", "104.0", quote(80)),  // yesterday, out
        ]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        let strikes: Vec<f64> = result.calls.iter().map(|c| c.strike).collect();
        assert_eq!(strikes, vec![101.0, 102.0]);
    }

    #[test]
    fn test_twelve_candidates_truncate_to_top_eight_by_oi() {
        let entries: Vec<(String, String, RawOptionQuote)> = (1..=12)
            .map(|i| {
                (
                    "2026-09-04:11".to_string(),
                    format!("{}.0", 100 + i),
                    // OI grows with the strike: 100, 200, ... 1200.
                    quote(i64::from(i) * 100),
                )
            })
            .collect();
        let borrowed: Vec<(&str, &str, RawOptionQuote)> = entries
            .iter()
            .map(|(e, s, q)| (e.as_str(), s.as_str(), q.clone()))
            .collect();
        let raw = chain(100.0, side(&borrowed), ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        // Top 8 by OI are strikes 105..=112, re-sorted ascending.
        let strikes: Vec<f64> = result.calls.iter().map(|c| c.strike).collect();
        assert_eq!(
            strikes,
            vec![105.0, 106.0, 107.0, 108.0, 109.0, 110.0, 111.0, 112.0]
        );
    }

    #[test]
    fn test_puts_display_sorted_descending_by_strike() {
        let puts = side(&[
            ("2026-09-04:11", "90.0", quote(80)),
            ("2026-09-04:11", "95.0", quote(300)),
            ("2026-09-04:11", "85.0", quote(150)),
        ]);
        let raw = chain(100.0, ExpDateMap::new(), puts);
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        let strikes: Vec<f64> = result.puts.iter().map(|p| p.strike).collect();
        assert_eq!(strikes, vec![95.0, 90.0, 85.0]);
    }

    #[test]
    fn test_empty_chain_yields_empty_sides() {
        let raw = RawChainResponse::default();
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert!(result.calls.is_empty());
        assert!(result.puts.is_empty());
        assert_eq!(result.underlying.price, 0.0);
    }

    #[test]
    fn test_premium_prefers_mark_then_last_then_zero() {
        let with_mark = RawOptionQuote {
            open_interest: Some(100),
            mark: Some(2.5),
            last: Some(2.0),
            volatility: None,
        };
        let zero_mark = RawOptionQuote {
            open_interest: Some(100),
            mark: Some(0.0),
            last: Some(2.0),
            volatility: None,
        };
        let neither = RawOptionQuote {
            open_interest: Some(100),
            mark: None,
            last: None,
            volatility: None,
        };
        assert_eq!(premium(&with_mark), 2.5);
        assert_eq!(premium(&zero_mark), 2.0);
        assert_eq!(premium(&neither), 0.0);
    }

    #[test]
    fn test_missing_volatility_defaults_to_zero() {
        let calls = side(&[(
            "2026-09-04:11",
            "105.0",
            RawOptionQuote {
                open_interest: Some(100),
                mark: Some(1.0),
                last: None,
                volatility: None,
            },
        )]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.calls[0].implied_volatility, 0.0);
    }

    #[test]
    fn test_array_bucket_uses_first_record() {
        let mut calls = ExpDateMap::new();
        calls.entry("2026-09-04:11".to_string()).or_default().insert(
            "105.0".to_string(),
            StrikeBucket::Many(vec![quote(80), quote(9000)]),
        );
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].open_interest, 80);
    }

    #[test]
    fn test_rank_is_idempotent_to_the_byte() {
        let calls = side(&[
            ("2026-09-04:11", "105.0", quote(60)),
            ("2026-09-11:18", "110.0", quote(200)),
        ]);
        let puts = side(&[("2026-09-04:11", "95.0", quote(90))]);
        let raw = chain(100.0, calls, puts);
        let filter = ChainFilter::default();

        let first = filter.rank(&raw, "SPY", reference_date());
        let second = filter.rank(&raw, "SPY", reference_date());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_serialized_shape_matches_display_contract() {
        let calls = side(&[("2026-09-04:11", "105.0", quote(60))]);
        let raw = chain(100.0, calls, ExpDateMap::new());
        let result = ChainFilter::default().rank(&raw, "SPY", reference_date());

        let json = serde_json::to_value(&result).unwrap();
        let call = &json["calls"][0];
        assert_eq!(call["type"], "Call");
        assert_eq!(call["openInterest"], 60);
        assert_eq!(call["impliedVolatility"], 22.4);
        assert_eq!(call["expiry"], "9/4");
        // The parsed date is internal only.
        assert!(call.get("expiry_date").is_none());
        assert_eq!(json["underlying"]["symbol"], "SPY");
    }
}
