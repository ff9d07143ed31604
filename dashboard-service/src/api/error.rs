use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::engine::MetricsError;
use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("account {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Store(StoreError::InvalidPage(_)) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "account store failure");
                let body = json!({
                    "error": "account store unavailable",
                    "code": "INTERNAL_ERROR",
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
            }
            ApiError::Metrics(MetricsError::InvalidSeries(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_SERIES")
            }
            ApiError::Metrics(MetricsError::InvalidProbability(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PROBABILITY")
            }
            ApiError::Metrics(MetricsError::DivisionUndefined) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DIVISION_UNDEFINED")
            }
        };

        let body = json!({
            "error": self.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
