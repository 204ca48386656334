//! Custom error types for the journal service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::repositories::StoreError;

/// Every way a request can fail; each variant maps to one status code
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No authorization header detected")]
    MissingHeader,

    #[error("Invalid authorization format")]
    MalformedCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The credential header names an unknown user or carries a wrong password
    #[error("Invalid user")]
    InvalidUser,

    /// A required body field is absent or empty
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("User {0} is already registered")]
    DuplicateUser(String),

    #[error("Title must be at most {} characters", crate::models::entry::MAX_TITLE_LEN)]
    TitleTooLong,

    #[error("No post found for the specified date")]
    EntryNotFound,

    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    #[error("Password hashing error: {0}")]
    PasswordHash(argon2::password_hash::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(username) => ApiError::DuplicateUser(username),
            other => ApiError::Store(other),
        }
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ApiError::PasswordHash(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingHeader | ApiError::InvalidCredentials | ApiError::InvalidUser => {
                StatusCode::FORBIDDEN
            }
            ApiError::MalformedCredentials
            | ApiError::MissingField(_)
            | ApiError::DuplicateUser(_)
            | ApiError::TitleTooLong => StatusCode::BAD_REQUEST,
            ApiError::EntryNotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details go to the log, never to the client.
        let error_message = if status.is_server_error() {
            error!("{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
