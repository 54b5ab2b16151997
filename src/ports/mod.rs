//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MarketData`: raw options-chain retrieval per symbol
//! - `TokenGateway`: OAuth authorization redirect and token forwarding

pub mod market_data;
pub mod token_gateway;
