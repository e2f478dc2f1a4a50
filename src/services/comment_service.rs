use crate::api::error::AppError;
use crate::entities::{comments, prelude::*};
use crate::models::{CommentView, CreateCommentRequest, UpdateCommentRequest};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use validator::Validate;

pub struct CommentService {
    db: DatabaseConnection,
}

impl CommentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_article_exists(&self, article_id: i32) -> Result<(), AppError> {
        Articles::find_by_id(article_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Article not found"))
    }

    /// Newest first
    pub async fn list_for_article(&self, article_id: i32) -> Result<Vec<CommentView>, AppError> {
        self.ensure_article_exists(article_id).await?;

        let rows = Comments::find()
            .select_only()
            .columns([
                comments::Column::Id,
                comments::Column::Nickname,
                comments::Column::Content,
                comments::Column::Time,
            ])
            .filter(comments::Column::ArticleId.eq(article_id))
            .order_by_desc(comments::Column::Time)
            .order_by_desc(comments::Column::Id)
            .into_model::<CommentView>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn create(
        &self,
        article_id: i32,
        req: CreateCommentRequest,
    ) -> Result<CommentView, AppError> {
        req.validate()
            .map_err(|e| AppError::invalid_fields("Nickname and content are required", &e))?;

        let (Some(nickname), Some(content)) = (req.nickname, req.content) else {
            return Err(AppError::validation("Nickname and content are required"));
        };

        self.ensure_article_exists(article_id).await?;

        // A concurrent article delete surfaces as a foreign key violation here
        let comment = comments::ActiveModel {
            article_id: Set(article_id),
            nickname: Set(nickname),
            content: Set(content),
            time: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("💬 Comment {} added to article {}", comment.id, article_id);

        Ok(CommentView {
            id: comment.id,
            nickname: comment.nickname,
            content: comment.content,
            time: comment.time,
        })
    }

    pub async fn update(&self, id: i32, req: UpdateCommentRequest) -> Result<(), AppError> {
        let comment = Comments::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        req.validate()
            .map_err(|e| AppError::invalid_fields("Invalid comment fields", &e))?;

        let mut active = comment.into_active_model();
        if let Some(nickname) = req.nickname {
            active.nickname = Set(nickname);
        }
        if let Some(content) = req.content {
            active.content = Set(content);
        }

        if active.is_changed() {
            active.update(&self.db).await?;
        }

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let res = Comments::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("Comment not found"));
        }

        tracing::info!("🗑️  Comment {} deleted", id);
        Ok(())
    }
}
