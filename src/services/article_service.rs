use crate::api::error::AppError;
use crate::entities::{articles, comments, prelude::*};
use crate::models::{
    ArticleDetail, ArticleSummary, CreateArticleRequest, CreatedArticle, UpdateArticleRequest,
};
use crate::utils::validation::parse_date;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use validator::Validate;

/// Blank summaries are stored as absent
fn non_blank(summary: Option<String>) -> Option<String> {
    summary.filter(|s| !s.trim().is_empty())
}

pub struct ArticleService {
    db: DatabaseConnection,
}

impl ArticleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first by publish date
    pub async fn list(&self) -> Result<Vec<ArticleSummary>, AppError> {
        let rows = Articles::find()
            .select_only()
            .columns([
                articles::Column::Id,
                articles::Column::Title,
                articles::Column::Date,
                articles::Column::Summary,
            ])
            .order_by_desc(articles::Column::Date)
            .order_by_desc(articles::Column::Id)
            .into_model::<ArticleSummary>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<ArticleDetail, AppError> {
        Articles::find_by_id(id)
            .select_only()
            .columns([
                articles::Column::Id,
                articles::Column::Title,
                articles::Column::Content,
                articles::Column::Date,
            ])
            .into_model::<ArticleDetail>()
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Article not found"))
    }

    pub async fn create(&self, req: CreateArticleRequest) -> Result<CreatedArticle, AppError> {
        req.validate()
            .map_err(|e| AppError::invalid_fields("Title, content and date are required", &e))?;

        let (Some(title), Some(content), Some(date)) = (req.title, req.content, req.date) else {
            return Err(AppError::validation("Title, content and date are required"));
        };
        let date = parse_date(&date)?;
        let now = Utc::now();

        let article = articles::ActiveModel {
            title: Set(title),
            content: Set(content),
            summary: Set(non_blank(req.summary)),
            date: Set(date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("📝 Article {} created: {}", article.id, article.title);

        Ok(CreatedArticle {
            id: article.id,
            title: article.title,
            date: article.date,
        })
    }

    /// Applies only the fields present in `req`
    pub async fn update(&self, id: i32, req: UpdateArticleRequest) -> Result<(), AppError> {
        let article = Articles::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Article not found"))?;

        req.validate()
            .map_err(|e| AppError::invalid_fields("Invalid article fields", &e))?;
        if req.summary_too_long() {
            return Err(AppError::Validation {
                message: "Invalid article fields".to_string(),
                errors: vec!["summary must be at most 500 characters".to_string()],
            });
        }

        let mut active = article.into_active_model();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(content) = req.content {
            active.content = Set(content);
        }
        if let Some(summary) = req.summary {
            active.summary = Set(non_blank(summary));
        }
        if let Some(date) = req.date {
            active.date = Set(parse_date(&date)?);
        }
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await?;

        tracing::info!("✏️  Article {} updated", id);
        Ok(())
    }

    /// Deletes the article and its comments in one transaction
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        let removed_comments = Comments::delete_many()
            .filter(comments::Column::ArticleId.eq(id))
            .exec(&txn)
            .await?;

        let res = Articles::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            // Dropping the transaction rolls back the comment delete
            return Err(AppError::not_found("Article not found"));
        }

        txn.commit().await?;

        tracing::info!(
            "🗑️  Article {} deleted with {} comments",
            id,
            removed_comments.rows_affected
        );
        Ok(())
    }
}
