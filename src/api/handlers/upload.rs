use crate::AppState;
use crate::api::error::AppError;
use crate::api::extract::ApiPath;
use crate::api::response::ApiResponse;
use crate::models::{FileSummary, IncomingUpload, UploadResponse};
use crate::utils::validation::{original_basename, validate_file_size, validate_image_type};
use axum::extract::{Multipart, State, multipart::MultipartRejection};
use bytes::BytesMut;

const FILE_FIELD: &str = "file";

#[utoipa::path(
    post,
    path = "/api/upload",
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing file, wrong type or too large")
    ),
    tag = "upload"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<UploadResponse>, AppError> {
    let mut multipart = multipart?;
    let max_size = state.file_service.max_file_size();
    let mut upload: Option<IncomingUpload> = None;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(original_basename) else {
            continue;
        };
        if upload.is_some() {
            return Err(AppError::validation("Only one file can be uploaded at a time"));
        }

        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_default();
        validate_image_type(&content_type)?;

        let mut buf = BytesMut::new();
        while let Some(chunk) = field.chunk().await? {
            buf.extend_from_slice(&chunk);
            validate_file_size(buf.len(), max_size)?;
        }

        tracing::debug!("Received {} ({} bytes)", file_name, buf.len());
        upload = Some(IncomingUpload {
            original_name: file_name,
            content_type,
            data: buf.freeze(),
        });
    }

    let upload = upload.ok_or_else(|| AppError::validation("Please choose a file to upload"))?;
    let stored = state.file_service.store_upload(upload).await?;

    Ok(ApiResponse::data(stored).with_message("File uploaded"))
}

#[utoipa::path(
    get,
    path = "/api/upload",
    responses(
        (status = 200, description = "Uploaded files, newest first", body = [FileSummary])
    ),
    tag = "upload"
)]
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<FileSummary>>, AppError> {
    let files = state.file_service.list().await?;
    Ok(ApiResponse::data(files))
}

#[utoipa::path(
    delete,
    path = "/api/upload/{id}",
    params(
        ("id" = i32, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File deleted"),
        (status = 404, description = "File not found")
    ),
    tag = "upload"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiResponse, AppError> {
    state.file_service.delete(id).await?;
    Ok(ApiResponse::message("File deleted"))
}
