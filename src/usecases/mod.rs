//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces. The dashboard has a
//! single workflow of note:
//!
//! - `ChainView`: fetch one symbol's raw chain and rank it for display

pub mod chain_view;

pub use chain_view::ChainView;
