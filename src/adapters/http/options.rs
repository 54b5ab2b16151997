//! Options Route - Ranked Chain Snapshot per Symbol
//!
//! `GET /options/:symbol` with the dashboard user's broker bearer
//! token in the `access_token` header. The token is forwarded to the
//! broker as-is; this service holds no user tokens of its own.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use chrono::Utc;

use crate::domain::chain::ChainResult;

use super::AppState;
use super::error::ApiError;

/// Handle `GET /options/:symbol`.
pub async fn chain_snapshot(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ChainResult>, ApiError> {
    let access_token = headers
        .get("access_token")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingAccessToken)?;

    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ApiError::MissingSymbol);
    }

    // The expiry window is anchored to the wall clock here at the
    // edge; the ranker itself only ever sees the explicit date.
    let reference_date = Utc::now().date_naive();

    let result = state
        .chain_view
        .snapshot(symbol, access_token, reference_date)
        .await
        .map_err(|err| ApiError::from_chain_error(err, symbol))?;

    Ok(Json(result))
}
