use crate::api::error::AppError;
use crate::config::AppConfig;
use crate::entities::{files, prelude::*};
use crate::models::{FileSummary, IncomingUpload, UploadResponse};
use crate::services::storage::StorageService;
use crate::utils::validation::{safe_extension, validate_file_size, validate_image_type};
use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;

/// Attempts at finding an unused storage name before giving up
const MAX_NAME_ATTEMPTS: usize = 3;

pub struct FileService {
    db: DatabaseConnection,
    storage: Arc<dyn StorageService>,
    config: AppConfig,
}

/// `file_<unix millis>_<random>[.ext]`
pub fn generate_storage_name(original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    match safe_extension(original_name) {
        Some(ext) => format!("file_{}_{}.{}", millis, suffix, ext),
        None => format!("file_{}_{}", millis, suffix),
    }
}

impl FileService {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageService>, config: AppConfig) -> Self {
        Self {
            db,
            storage,
            config,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    /// Validates, writes to disk, then records the upload
    pub async fn store_upload(&self, upload: IncomingUpload) -> Result<UploadResponse, AppError> {
        validate_image_type(&upload.content_type)?;
        validate_file_size(upload.data.len(), self.config.max_file_size)?;

        let size = upload.data.len() as i64;
        let (filename, file_path) = self.write_with_unique_name(&upload).await?;

        let now = Utc::now();
        let record = files::ActiveModel {
            filename: Set(filename.clone()),
            original_name: Set(upload.original_name.clone()),
            file_path: Set(file_path),
            file_type: Set(upload.content_type.clone()),
            file_size: Set(size),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete_file(&filename).await {
                    tracing::warn!("Failed to remove orphaned upload {}: {}", filename, cleanup);
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            "📤 Stored {} as {} ({} bytes)",
            record.original_name,
            record.filename,
            record.file_size
        );

        Ok(UploadResponse {
            url: self.config.public_url(&record.filename),
            id: record.id,
            filename: record.original_name,
            size: record.file_size,
        })
    }

    async fn write_with_unique_name(
        &self,
        upload: &IncomingUpload,
    ) -> Result<(String, String), AppError> {
        let mut last_err = None;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = generate_storage_name(&upload.original_name);
            match self.storage.upload_file(&filename, upload.data.clone()).await {
                Ok(path) => return Ok((filename, path)),
                Err(e) => {
                    let collided = e
                        .downcast_ref::<std::io::Error>()
                        .is_some_and(|io| io.kind() == std::io::ErrorKind::AlreadyExists);
                    if !collided {
                        return Err(AppError::Internal(format!("Failed to store upload: {}", e)));
                    }
                    last_err = Some(e);
                }
            }
        }
        Err(AppError::Internal(format!(
            "No free storage name after {} attempts: {:?}",
            MAX_NAME_ATTEMPTS, last_err
        )))
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<FileSummary>, AppError> {
        let rows = Files::find()
            .select_only()
            .columns([
                files::Column::Id,
                files::Column::OriginalName,
                files::Column::FileType,
                files::Column::FileSize,
                files::Column::CreatedAt,
            ])
            .order_by_desc(files::Column::CreatedAt)
            .order_by_desc(files::Column::Id)
            .into_model::<FileSummary>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Removes the stored object if present, then the row
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let file = Files::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let removed = self
            .storage
            .delete_file(&file.filename)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete {}: {}", file.filename, e)))?;
        if !removed {
            tracing::warn!("Stored object {} was already missing", file.filename);
        }

        let res = Files::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("File not found"));
        }

        tracing::info!("🗑️  File {} deleted", id);
        Ok(())
    }
}
