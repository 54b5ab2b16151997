//! Domain layer - The pure chain filter/ranker.
//!
//! This module contains the pure transformation from raw broker chain
//! payloads to display-ready snapshots. No I/O and no clock reads here
//! (hexagonal architecture inner ring): the reference date anchoring
//! the expiry window is always an explicit input.

pub mod chain;
pub mod expiry;
pub mod raw;

// Re-export core types for convenience
pub use chain::{ChainFilter, ChainResult, NormalizedOption, OptionType, Underlying};
pub use raw::{RawChainResponse, RawOptionQuote, StrikeBucket};
