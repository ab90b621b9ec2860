//! Routes for the SME registry.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, patch},
};
use db::models::sme::{CreateSme, Sme, UpdateSme};
use services::services::sme_registry::SmeRegistryService;
use utils::response::ApiResponse;
use uuid::Uuid;

use super::CreatedResponse;
use crate::{AppState, error::ApiError, extract::ValidJson};

pub async fn create_sme(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateSme>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, ApiError> {
    let sme = SmeRegistryService::register(&state.db().pool, payload).await?;

    Ok(ResponseJson(ApiResponse::success_with_message(
        CreatedResponse { id: sme.id },
        "sme registered successfully",
    )))
}

/// Newest first.
pub async fn list_smes(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Sme>>>, ApiError> {
    let smes = SmeRegistryService::list(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(smes)))
}

/// Partial update: only the fields present in the body are written.
pub async fn update_sme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidJson(payload): ValidJson<UpdateSme>,
) -> Result<ResponseJson<ApiResponse<Sme>>, ApiError> {
    let sme = SmeRegistryService::update(&state.db().pool, id, payload)
        .await?
        .ok_or(ApiError::NotFound("sme"))?;

    Ok(ResponseJson(ApiResponse::success(sme)))
}

pub async fn delete_sme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    SmeRegistryService::delete(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/sme_registry",
        Router::new()
            .route("/", get(list_smes).post(create_sme))
            .route("/{id}", patch(update_sme).delete(delete_sme)),
    )
}
