//! OAuth redirect glue. The providers themselves are opaque.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use services::services::oauth::{OAuthError, OAuthProvider, TokenResponse};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::ValidJson};

#[derive(Debug, Clone, Serialize, TS)]
pub struct AuthorizeResponse {
    pub url: String,
}

#[derive(Debug, Deserialize, TS)]
pub struct CallbackRequest {
    pub code: String,
}

fn parse_provider(raw: &str) -> Result<OAuthProvider, OAuthError> {
    raw.parse::<OAuthProvider>()
        .map_err(|_| OAuthError::UnknownProvider(raw.to_string()))
}

/// Where to send the user for this provider's consent screen.
pub async fn authorize(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<ResponseJson<ApiResponse<AuthorizeResponse>>, ApiError> {
    let provider = parse_provider(&provider)?;

    let url = state.oauth().authorize_url(provider)?;
    Ok(ResponseJson(ApiResponse::success(AuthorizeResponse { url })))
}

/// Exchange the authorization code the provider redirected back with.
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    ValidJson(payload): ValidJson<CallbackRequest>,
) -> Result<ResponseJson<ApiResponse<TokenResponse>>, ApiError> {
    let provider = parse_provider(&provider)?;

    let token = state.oauth().exchange_code(provider, &payload.code).await?;
    Ok(ResponseJson(ApiResponse::success(token)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/auth",
        Router::new()
            .route("/{provider}", get(authorize))
            .route("/{provider}/callback", post(callback)),
    )
}
