// API error taxonomy
//
// Four terminal classes cross the HTTP boundary: validation (400),
// not-found (404), storage (500) and transfer (500). Upstream generation
// failures never appear here - the generation gateway absorbs them with a
// local fallback.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::database::StoreError;
use crate::transfer::TransferError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[source] StoreError),
    #[error("transfer error: {0}")]
    Transfer(#[source] TransferError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::EmptyUpdate => ApiError::Validation(err.to_string()),
            other => ApiError::Storage(other),
        }
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::InvalidFileName(_) => ApiError::Validation(err.to_string()),
            other => ApiError::Transfer(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Storage(err) => {
                log::error!("storage error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Transfer(err) => {
                log::error!("transfer error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate transfer URL".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound("123".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn empty_update_maps_to_validation() {
        let err: ApiError = StoreError::EmptyUpdate.into();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn invalid_file_name_maps_to_validation() {
        let err: ApiError =
            TransferError::InvalidFileName("File name cannot be empty".to_string()).into();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
