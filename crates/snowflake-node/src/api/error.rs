//! Mapping of scene errors and rejections onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use snowflake_core::{SceneError, TriageResult};
use tracing::error;

/// Error returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// An engine error.
    Scene(SceneError),

    /// Triage said NO; the body is the full result.
    Rejected(TriageResult),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Scene(err) => match err {
                SceneError::Construction { .. } | SceneError::SerializationError(_) => {
                    StatusCode::BAD_REQUEST
                }
                SceneError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
                SceneError::NotDraftable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SceneError::NotFound { .. } => StatusCode::NOT_FOUND,
                SceneError::AlreadyExists { .. } => StatusCode::CONFLICT,
                SceneError::ConnectionError(_) => StatusCode::BAD_GATEWAY,
                SceneError::StoreError { .. } | SceneError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<SceneError> for ApiError {
    fn from(err: SceneError) -> Self {
        ApiError::Scene(err)
    }
}

/// Bodies that are not JSON, or do not fit the request shape, are
/// construction errors like any other malformed card.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Scene(SceneError::construction(None, rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Rejected(result) => (status, Json(result)).into_response(),
            ApiError::Scene(err) => {
                if status.is_server_error() {
                    error!("❌ {}", err);
                }
                let body = json!({
                    "error": err.to_string(),
                    "scene_id": err.scene_id(),
                });
                (status, Json(body)).into_response()
            }
        }
    }
}
