//! Error envelope returned by every handler

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::ServiceError;

const NOT_FOUND_MESSAGE: &str = "requested resource is not found";
const NOT_FOUND_DEVELOPER_MESSAGE: &str =
    "maybe you have an error in your request or requested resource not found";
const VALIDATION_DEVELOPER_MESSAGE: &str =
    "input validation failed. please, provide valid values";
const INTERNAL_MESSAGE: &str = "something went wrong on the server side";

/// Wire shape of an error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub developer_message: String,
    pub code: u16,
}

/// Custom error type for the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed input, failed validation or rejected credentials
    #[error("{message}")]
    BadRequest {
        message: String,
        developer_message: String,
    },

    #[error("requested resource is not found")]
    NotFound,

    /// Unexpected failure; the detail is only shown as the developer message
    #[error("internal server error: {0}")]
    Internal(String),

    #[error("request body was not received in time")]
    RequestTimeout,

    #[error("request was not handled in time")]
    HandlerTimeout,

    #[error("request body is too large")]
    PayloadTooLarge,

    #[error("request header fields too large")]
    HeadersTooLarge,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, developer_message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            developer_message: developer_message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::bad_request(message, VALIDATION_DEVELOPER_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RequestTimeout | ApiError::HandlerTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::HeadersTooLarge => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound => ApiError::NotFound,
            ServiceError::EmailTaken | ServiceError::WrongPassword => {
                ApiError::bad_request(err.to_string(), "")
            }
            ServiceError::Validation(message) => ApiError::validation(message),
            ServiceError::Hashing(_) | ServiceError::Database(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, developer_message) = match self {
            ApiError::BadRequest {
                message,
                developer_message,
            } => (message, developer_message),
            ApiError::NotFound => (
                NOT_FOUND_MESSAGE.to_string(),
                NOT_FOUND_DEVELOPER_MESSAGE.to_string(),
            ),
            ApiError::Internal(detail) => {
                error!("internal error: {}", detail);
                (INTERNAL_MESSAGE.to_string(), detail)
            }
            other => (other.to_string(), String::new()),
        };

        let body = Json(ErrorResponse {
            message,
            developer_message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
