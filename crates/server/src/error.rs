use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::{
    expert_registry::ExpertRegistryError, oauth::OAuthError, sme_registry::SmeRegistryError,
};
use thiserror::Error;
use utils::response::ApiResponse;

/// Request-level failures, with their kind preserved so the HTTP status can
/// distinguish client mistakes from store failures. The original error text
/// always reaches the client inside the envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    ExpertRegistry(#[from] ExpertRegistryError),
    #[error(transparent)]
    SmeRegistry(#[from] SmeRegistryError),
    #[error(transparent)]
    OAuth(#[from] OAuthError),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ExpertRegistry(ExpertRegistryError::Validation { .. }) => StatusCode::BAD_REQUEST,
            Self::SmeRegistry(SmeRegistryError::NoFieldsToUpdate) => StatusCode::BAD_REQUEST,
            Self::OAuth(OAuthError::UnknownProvider(_) | OAuthError::NotConfigured(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::OAuth(_) => StatusCode::BAD_GATEWAY,
            Self::ExpertRegistry(_) | Self::SmeRegistry(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
