//! Expiration-Key Parsing and Display Formatting
//!
//! Broker expiration keys look like `"2026-09-11:18"` — a calendar date
//! plus an optional days-to-expiration suffix after a colon. Parse
//! failures are recovered by the caller (the expiration is skipped),
//! never surfaced as errors.

use chrono::{Datelike, NaiveDate};

/// Sentinel shown when an expiration date cannot be parsed.
pub const EXPIRY_NOT_AVAILABLE: &str = "N/A";

/// Parse an expiration key into a calendar date.
///
/// Strips any colon-delimited suffix before parsing. Returns `None`
/// when the remainder is not a valid `YYYY-MM-DD` date.
pub fn parse_expiration_key(key: &str) -> Option<NaiveDate> {
    let date_part = key.split_once(':').map_or(key, |(date, _dte)| date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Short unpadded `month/day` display form, e.g. `"9/11"`.
pub fn format_expiry(key: &str) -> String {
    parse_expiration_key(key).map_or_else(
        || EXPIRY_NOT_AVAILABLE.to_string(),
        |date| format!("{}/{}", date.month(), date.day()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_with_dte_suffix() {
        let date = parse_expiration_key("2026-09-11:18").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 9, 11).unwrap());
    }

    #[test]
    fn test_parse_key_without_suffix() {
        let date = parse_expiration_key("2026-01-05").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn test_parse_malformed_key_yields_none() {
        assert!(parse_expiration_key("not-a-date").is_none());
        assert!(parse_expiration_key("2026-13-40:5").is_none());
        assert!(parse_expiration_key("").is_none());
    }

    #[test]
    fn test_format_is_unpadded_month_day() {
        assert_eq!(format_expiry("2026-09-11:18"), "9/11");
        assert_eq!(format_expiry("2026-01-05"), "1/5");
    }

    #[test]
    fn test_format_falls_back_to_sentinel() {
        assert_eq!(format_expiry("garbage"), EXPIRY_NOT_AVAILABLE);
    }
}
