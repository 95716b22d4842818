//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Failure of a single statement against the store. Display is the store's own message.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The statement reached the store and was refused for the data it carried
    /// (constraint violation, value out of range, bad cast).
    #[error("{0}")]
    Rejected(String),
    /// The store could not be reached in time.
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Failed(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) => {
                let class = db.code().map(|c| c.chars().take(2).collect::<String>());
                match class.as_deref() {
                    // 22: data exception, 23: integrity constraint violation
                    Some("22") | Some("23") => StoreError::Rejected(db.message().to_string()),
                    _ => StoreError::Failed(db.message().to_string()),
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            _ => StoreError::Failed(e.to_string()),
        }
    }
}

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::Rejected(_) => StatusCode::BAD_REQUEST,
            StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("validation: {}", .0.join(" "))]
    Validation(Vec<String>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(e.into())
    }
}

/// `{ "error": ... }` where the payload is either one message or the list of validation failures.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    List(Vec<String>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Config(e) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorDetail::Message(e.to_string())),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, ErrorDetail::List(errors)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorDetail::Message(msg)),
            AppError::Store(e) => {
                tracing::warn!(error = %e, "store call failed");
                (e.status(), ErrorDetail::Message(e.to_string()))
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
