use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Row of the article list
#[derive(Debug, Clone, Serialize, FromQueryResult, ToSchema)]
pub struct ArticleSummary {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromQueryResult, ToSchema)]
pub struct ArticleDetail {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedArticle {
    pub id: i32,
    pub title: String,
    pub date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateArticleRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, max = 255, message = "title must be 1 to 255 characters")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content must not be empty")
    )]
    pub content: Option<String>,
    #[validate(length(max = 500, message = "summary must be at most 500 characters"))]
    pub summary: Option<String>,
    /// `YYYY-MM-DD`
    #[validate(
        required(message = "date is required"),
        length(min = 1, message = "date must not be empty")
    )]
    pub date: Option<String>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    /// `null` or `""` clears the summary
    #[serde(default, deserialize_with = "crate::utils::validation::double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    #[validate(length(min = 1, message = "date must not be empty"))]
    pub date: Option<String>,
}

impl UpdateArticleRequest {
    /// Summary length check; `validator` does not reach through the nested option
    pub fn summary_too_long(&self) -> bool {
        matches!(&self.summary, Some(Some(s)) if s.chars().count() > 500)
    }
}
