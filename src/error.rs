use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::domain::DomainError;
use crate::handlers::shared::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        log::log!(
            self.log_level(),
            "Request failed with status {}: {}",
            status_code,
            self
        );

        // Store and internal failures reach the client without internals.
        let error_message = match self {
            AppError::DatabaseError(_) => "Failed to access the data store".to_string(),
            AppError::InternalServerError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&error_message))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        log::error!("Database error: {}", error);
        AppError::DatabaseError(error.into())
    }
}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        // Validation failures travel through services as anyhow errors.
        if let Some(domain_error) = error.downcast_ref::<DomainError>() {
            return AppError::BadRequest(domain_error.to_string());
        }

        if error.is::<sqlx::Error>() {
            log::error!("Database error: {}", error);
            return AppError::DatabaseError(error);
        }

        log::error!("Anyhow error: {:#}", error);
        AppError::InternalServerError(Some(error.to_string()))
    }
}

impl AppError {
    pub fn internal_server_error() -> Self {
        AppError::InternalServerError(None)
    }

    /// Store and internal failures log at `error`; rejected requests at `warn`.
    pub fn log_level(&self) -> log::Level {
        if self.status_code().is_server_error() {
            log::Level::Error
        } else {
            log::Level::Warn
        }
    }
}
