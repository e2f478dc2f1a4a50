use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::response::ApiResponse;

/// Constraint violations reported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0:?}")]
    Constraint(ConstraintKind),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Validation failure carrying one message per failing field
    pub fn invalid_fields(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        AppError::Validation {
            message: message.into(),
            errors: crate::utils::validation::field_messages(errors),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err {
            // Row vanished between read and write (concurrent delete)
            DbErr::RecordNotUpdated => AppError::NotFound("Record not found".to_string()),
            err => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Constraint(ConstraintKind::Unique)
                }
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    AppError::Constraint(ConstraintKind::ForeignKey)
                }
                _ => AppError::Database(err),
            },
        }
    }
}

impl From<crate::utils::validation::ValidationError> for AppError {
    fn from(err: crate::utils::validation::ValidationError) -> Self {
        AppError::validation(err.message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::validation("File size exceeds the upload limit")
        } else {
            AppError::validation(err.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation { message, errors } => (StatusCode::BAD_REQUEST, message, errors),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            AppError::Constraint(kind) => {
                tracing::warn!("Constraint violation: {:?}", kind);
                let message = match kind {
                    ConstraintKind::Unique => "Record already exists",
                    ConstraintKind::ForeignKey => "Referenced record does not exist",
                };
                (StatusCode::BAD_REQUEST, message.to_string(), Vec::new())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    Vec::new(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    Vec::new(),
                )
            }
        };

        (status, ApiResponse::error(message, errors)).into_response()
    }
}
