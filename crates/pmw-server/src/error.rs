//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pmw_store::{StoreError, StoreErrorKind};
use pmw_upstream::UpstreamError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request path carried a malformed entity id.
    #[error("Invalid entity id: {0}")]
    InvalidId(String),

    /// Request body failed domain validation.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Store error.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Upstream generation error.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Generation requested but no upstream is configured.
    #[error("No generation upstream configured")]
    UpstreamUnavailable,

    /// Internal failure (blocking task died, etc).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Store(err) => match err.kind {
                StoreErrorKind::NotFound => StatusCode::NOT_FOUND,
                StoreErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                StoreErrorKind::Conflict => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, axum::Json(json!({"error": self.to_string()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pmw_store::StoreError;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_invalid_id_is_bad_request() {
        let err = ServerError::InvalidId("nope".to_owned());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_not_found_is_404() {
        let err = ServerError::from(StoreError::not_found(Uuid::nil()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_invalid_input_is_400() {
        let err = ServerError::from(StoreError::invalid_input("empty name"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_error_is_bad_gateway() {
        let err = ServerError::from(UpstreamError::Status {
            status: 500,
            body: "boom".to_owned(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_missing_upstream_is_unavailable() {
        assert_eq!(
            ServerError::UpstreamUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_response_is_json() {
        let response = ServerError::Validation("prompt must not be empty".to_owned())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap();
        assert!(content_type.to_str().unwrap().contains("application/json"));
    }
}
