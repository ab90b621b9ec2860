pub mod auth;
pub mod experts;
pub mod health;
pub mod sme_registry;

use axum::Router;
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::AppState;

/// Body of a successful creation: the new row's id.
#[derive(Debug, Clone, Serialize, TS)]
pub struct CreatedResponse {
    pub id: Uuid,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(experts::router())
        .merge(sme_registry::router())
        .merge(auth::router())
}
