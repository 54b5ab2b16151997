//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies, plus the inbound HTTP surface. Each
//! sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `broker`: brokerage REST API client (market data + OAuth)
//! - `http`: axum router and handlers for the dashboard API

pub mod broker;
pub mod http;
