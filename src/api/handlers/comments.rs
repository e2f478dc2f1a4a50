use crate::AppState;
use crate::api::error::AppError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::response::ApiResponse;
use crate::models::{CommentView, CreateCommentRequest, UpdateCommentRequest};
use axum::{extract::State, http::StatusCode};

#[utoipa::path(
    get,
    path = "/api/comments/articles/{id}/comments",
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Comments, newest first", body = [CommentView]),
        (status = 404, description = "Article not found")
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(article_id): ApiPath<i32>,
) -> Result<ApiResponse<Vec<CommentView>>, AppError> {
    let comments = state.comment_service.list_for_article(article_id).await?;
    Ok(ApiResponse::data(comments))
}

#[utoipa::path(
    post,
    path = "/api/comments/articles/{id}/comments",
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentView),
        (status = 400, description = "Missing nickname or content"),
        (status = 404, description = "Article not found")
    ),
    tag = "comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    ApiPath(article_id): ApiPath<i32>,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, ApiResponse<CommentView>), AppError> {
    let comment = state.comment_service.create(article_id, req).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(comment)))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    params(
        ("id" = i32, Path, description = "Comment ID")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated"),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Comment not found")
    ),
    tag = "comments"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateCommentRequest>,
) -> Result<ApiResponse, AppError> {
    state.comment_service.update(id, req).await?;
    Ok(ApiResponse::message("Comment updated"))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(
        ("id" = i32, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiResponse, AppError> {
    state.comment_service.delete(id).await?;
    Ok(ApiResponse::message("Comment deleted"))
}
