use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromQueryResult, ToSchema)]
pub struct CommentView {
    pub id: i32,
    pub nickname: String,
    pub content: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(
        required(message = "nickname is required"),
        length(min = 1, max = 50, message = "nickname must be 1 to 50 characters")
    )]
    pub nickname: Option<String>,
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content must not be empty")
    )]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 50, message = "nickname must be 1 to 50 characters"))]
    pub nickname: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
}
