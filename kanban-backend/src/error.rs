//! Error types for the notes API
//!
//! Client mistakes (missing field, unknown id) answer 400 with a
//! `{ message }` object; anything else answers 500 with the raw error text.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use kanban_types::ErrorResponse;
use thiserror::Error;

use crate::db::DbError;

pub const DATA_REQUIRED: &str = "Data is required";
pub const DATA_NOT_FOUND: &str = "Data not found";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Storage(#[from] DbError),

    #[error("Storage task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ApiError {
    pub fn data_required() -> Self {
        ApiError::Validation(DATA_REQUIRED.to_string())
    }

    pub fn data_not_found() -> Self {
        ApiError::NotFound(DATA_NOT_FOUND.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => ErrorResponse::message(msg.as_str()),
            other => {
                log::error!("Request failed: {}", other);
                ErrorResponse::raw(other.to_string())
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(ApiError::data_required().status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::data_not_found().status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_storage_errors_are_500_with_raw_text() {
        let err = ApiError::from(DbError::Sqlite(rusqlite::Error::InvalidQuery));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], err.to_string().as_str());
    }

    #[actix_web::test]
    async fn test_client_error_body_has_message() {
        let resp = ApiError::data_not_found().error_response();

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "ok": false, "error": { "message": "Data not found" } }));
    }
}
