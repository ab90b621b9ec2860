//! Routes for expert registration.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{delete, get},
};
use db::models::expert::{CreateExpert, Expert};
use services::services::expert_registry::ExpertRegistryService;
use utils::response::ApiResponse;
use uuid::Uuid;

use super::CreatedResponse;
use crate::{AppState, error::ApiError, extract::ValidJson};

pub async fn create_expert(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateExpert>,
) -> Result<ResponseJson<ApiResponse<CreatedResponse>>, ApiError> {
    let expert = ExpertRegistryService::register(&state.db().pool, payload).await?;

    Ok(ResponseJson(ApiResponse::success_with_message(
        CreatedResponse { id: expert.id },
        "expert registered successfully",
    )))
}

/// Newest first.
pub async fn list_experts(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Expert>>>, ApiError> {
    let experts = ExpertRegistryService::list(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(experts)))
}

pub async fn delete_expert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    ExpertRegistryService::delete(&state.db().pool, id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/experts",
        Router::new()
            .route("/", get(list_experts).post(create_expert))
            .route("/{id}", delete(delete_expert)),
    )
}
