use crate::AppState;
use crate::api::error::AppError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::response::ApiResponse;
use crate::models::{
    ArticleDetail, ArticleSummary, CreateArticleRequest, CreatedArticle, UpdateArticleRequest,
};
use axum::{extract::State, http::StatusCode};

#[utoipa::path(
    get,
    path = "/api/articles",
    responses(
        (status = 200, description = "Articles, newest first", body = [ArticleSummary])
    ),
    tag = "articles"
)]
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ArticleSummary>>, AppError> {
    let articles = state.article_service.list().await?;
    Ok(ApiResponse::data(articles))
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article found", body = ArticleDetail),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn get_article(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiResponse<ArticleDetail>, AppError> {
    let article = state.article_service.get(id).await?;
    Ok(ApiResponse::data(article))
}

#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = CreatedArticle),
        (status = 400, description = "Missing or invalid fields")
    ),
    tag = "articles"
)]
pub async fn create_article(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateArticleRequest>,
) -> Result<(StatusCode, ApiResponse<CreatedArticle>), AppError> {
    let created = state.article_service.create(req).await?;
    Ok((StatusCode::CREATED, ApiResponse::data(created)))
}

#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated"),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn update_article(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateArticleRequest>,
) -> Result<ApiResponse, AppError> {
    state.article_service.update(id, req).await?;
    Ok(ApiResponse::message("Article updated"))
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article and its comments deleted"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn delete_article(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiResponse, AppError> {
    state.article_service.delete(id).await?;
    Ok(ApiResponse::message("Article deleted"))
}
