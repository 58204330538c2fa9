use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Bag Not Found")]
    BagNotFound,

    #[error("Not Found")]
    CuboidNotFound,

    #[error("Bag is disabled")]
    BagDisabled,

    #[error("Insufficient capacity in bag")]
    InsufficientCapacity,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BagNotFound => StatusCode::NOT_FOUND,
            ServerError::CuboidNotFound => StatusCode::NOT_FOUND,
            ServerError::BagDisabled => StatusCode::BAD_REQUEST,
            ServerError::InsufficientCapacity => StatusCode::BAD_REQUEST,
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => ServerError::Validation(msg),
            StoreError::Db(e) => ServerError::Internal(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ServerError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_business_rule_errors_are_bad_requests() {
        let (status, body) = body_json(ServerError::InsufficientCapacity).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Insufficient capacity in bag");

        let (status, body) = body_json(ServerError::BagDisabled).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bag is disabled");

        let (status, body) = body_json(ServerError::Validation("width must be non-negative".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "width must be non-negative");
    }

    #[tokio::test]
    async fn test_missing_entities_are_not_found() {
        let (status, body) = body_json(ServerError::BagNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Bag Not Found");

        let (status, body) = body_json(ServerError::CuboidNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let (status, body) = body_json(ServerError::Internal("disk I/O error".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_store_validation_maps_to_validation() {
        let err: ServerError = StoreError::Validation("depth must be non-negative".into()).into();
        assert!(matches!(err, ServerError::Validation(ref m) if m == "depth must be non-negative"));
    }
}
