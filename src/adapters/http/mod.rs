//! Dashboard HTTP Surface - axum Router and Handlers
//!
//! Inbound routes for the options dashboard:
//! - `GET /options/:symbol` — ranked chain snapshot
//! - `GET /auth` — redirect to the broker consent page
//! - `POST /token` / `POST /refresh` — OAuth token forwarding
//! - `GET /live` — liveness probe
//!
//! Sub-modules:
//! - `error`: error taxonomy to HTTP status mapping
//! - `oauth`: authorization redirect and token forwarding handlers
//! - `options`: per-symbol chain snapshot handler

pub mod error;
pub mod oauth;
pub mod options;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};

use crate::ports::token_gateway::TokenGateway;
use crate::usecases::chain_view::ChainView;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Chain snapshot workflow.
    pub chain_view: Arc<ChainView>,
    /// OAuth forwarding port.
    pub token_gateway: Arc<dyn TokenGateway>,
}

/// Build the dashboard router with all routes wired.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/options/:symbol", get(options::chain_snapshot))
        .route("/auth", get(oauth::authorize))
        .route("/token", post(oauth::exchange_token))
        .route("/refresh", post(oauth::refresh_token))
        .route("/live", get(|| async { StatusCode::OK }))
        .with_state(state)
}
