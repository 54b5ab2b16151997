//! OAuth Routes - Authorization Redirect and Token Forwarding
//!
//! Thin glue over the `TokenGateway` port. Token responses from the
//! broker are forwarded verbatim; the dashboard browser keeps the
//! tokens, this service stores nothing.

use axum::Json;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;
use tracing::info;

use super::AppState;
use super::error::ApiError;

/// Body of `POST /token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub code: String,
}

/// Body of `POST /refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Handle `GET /auth`: send the browser to the broker consent page.
pub async fn authorize(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.token_gateway.authorize_url())
}

/// Handle `POST /token`: exchange an authorization code.
pub async fn exchange_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if body.code.is_empty() {
        return Err(ApiError::MissingCode);
    }

    let tokens = state
        .token_gateway
        .exchange_code(&body.code)
        .await
        .map_err(ApiError::from_token_error)?;
    info!("Authorization code exchanged");
    Ok(Json(tokens))
}

/// Handle `POST /refresh`: exchange a refresh token.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if body.refresh_token.is_empty() {
        return Err(ApiError::MissingRefreshToken);
    }

    let tokens = state
        .token_gateway
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from_token_error)?;
    info!("Access token refreshed");
    Ok(Json(tokens))
}
