pub mod articles;
pub mod comments;
pub mod health;
pub mod upload;

use crate::api::error::AppError;
use axum::http::Uri;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Endpoint {} not found", uri))
}
