//! Response handling and error mapping.
//!
//! # Responsibilities
//! - Map every failure to a status code and a `{"error": "..."}` body
//! - Keep internal details out of 5xx bodies
//!
//! # Design Decisions
//! - Every response body is JSON, including errors
//! - Messages for 4xx errors are fixed strings clients may match on

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::catalog::{PayloadError, StoreError};

/// Errors a request can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body or invalid field.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("Product not found")]
    ProductNotFound,

    #[error("Endpoint not found")]
    EndpointNotFound,

    #[error("Request body too large")]
    BodyTooLarge,

    #[error("Request timed out")]
    RequestTimeout,

    /// Unexpected fault; the detail is logged, never sent.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Payload(_) => StatusCode::BAD_REQUEST,
            ApiError::ProductNotFound | ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::ProductNotFound,
            StoreError::IdSpaceExhausted(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
