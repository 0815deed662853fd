use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feedback_core::{db::DbError, ResponseBody, SERVER_ERROR_MESSAGE};
use log::error;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("database error: {0}")]
    Db(#[from] DbError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(
            "event=request_failed module=server status=error error_code=unexpected error={}",
            self
        );

        server_error_response()
    }
}

/// Generic 500 body; never carries failure detail.
pub fn server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResponseBody::error(SERVER_ERROR_MESSAGE)),
    )
        .into_response()
}
