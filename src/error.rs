//! Error types for the board server.
//!
//! Every failure the server can hit while handling a request collapses into a
//! generic `500 Internal Server Error`. The variant only matters for logging.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

/// Result alias used across storage, service and config code.
pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Error, Debug)]
pub enum KanbanError {
    /// Statement preparation or execution failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// The blocking thread pool dropped the job before it finished.
    #[error("blocking task failed: {0}")]
    Blocking(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<actix_web::error::BlockingError> for KanbanError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        KanbanError::Blocking(err.to_string())
    }
}

impl ResponseError for KanbanError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        error!("Request failed: {}", self);
        HttpResponse::InternalServerError().body("Internal Server Error")
    }
}
