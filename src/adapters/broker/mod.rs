//! Brokerage API Adapter
//!
//! Implements the HTTP client for the brokerage market-data and OAuth
//! endpoints. Requests are single-shot by design: every failure is
//! surfaced to the dashboard caller immediately, with no retry policy.
//!
//! Sub-modules:
//! - `auth`: OAuth client credentials and Basic header encoding
//! - `client`: reqwest client implementing the broker-facing ports

pub mod auth;
pub mod client;

pub use auth::OAuthCredentials;
pub use client::BrokerClient;
