use bytes::Bytes;
use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromQueryResult, ToSchema)]
pub struct FileSummary {
    pub id: i32,
    pub original_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Public URL of the stored image
    pub url: String,
    pub id: i32,
    /// Name the client uploaded the file under
    pub filename: String,
    pub size: i64,
}

/// An accepted upload waiting to be written
#[derive(Debug)]
pub struct IncomingUpload {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}
