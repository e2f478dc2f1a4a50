pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod migration;
pub mod models;
pub mod services;
pub mod utils;

use crate::api::handlers;
use crate::config::AppConfig;
use crate::services::article_service::ArticleService;
use crate::services::comment_service::CommentService;
use crate::services::file_service::FileService;
use crate::services::storage::StorageService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::articles::list_articles,
        handlers::articles::get_article,
        handlers::articles::create_article,
        handlers::articles::update_article,
        handlers::articles::delete_article,
        handlers::comments::list_comments,
        handlers::comments::create_comment,
        handlers::comments::update_comment,
        handlers::comments::delete_comment,
        handlers::upload::upload_image,
        handlers::upload::list_files,
        handlers::upload::delete_file,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::ArticleSummary,
            models::ArticleDetail,
            models::CreatedArticle,
            models::CreateArticleRequest,
            models::UpdateArticleRequest,
            models::CommentView,
            models::CreateCommentRequest,
            models::UpdateCommentRequest,
            models::FileSummary,
            models::UploadResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "articles", description = "Blog articles"),
        (name = "comments", description = "Reader comments on articles"),
        (name = "upload", description = "Image uploads"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub article_service: Arc<ArticleService>,
    pub comment_service: Arc<CommentService>,
    pub file_service: Arc<FileService>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, storage: Arc<dyn StorageService>, config: AppConfig) -> Self {
        Self {
            article_service: Arc::new(ArticleService::new(db.clone())),
            comment_service: Arc::new(CommentService::new(db.clone())),
            file_service: Arc::new(FileService::new(
                db.clone(),
                storage.clone(),
                config.clone(),
            )),
            db,
            storage,
            config,
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn create_app(state: AppState) -> Router {
    let upload_limit = state.config.max_file_size + MULTIPART_OVERHEAD;
    let uploads = ServeDir::new(&state.config.upload_dir);
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::health::index))
        .route("/api/health", get(handlers::health::health_check))
        .route(
            "/api/articles",
            get(handlers::articles::list_articles).post(handlers::articles::create_article),
        )
        .route(
            "/api/articles/:id",
            get(handlers::articles::get_article)
                .put(handlers::articles::update_article)
                .delete(handlers::articles::delete_article),
        )
        .route(
            "/api/comments/articles/:id/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/api/comments/:id",
            put(handlers::comments::update_comment).delete(handlers::comments::delete_comment),
        )
        .route(
            "/api/upload",
            get(handlers::upload::list_files)
                .post(handlers::upload::upload_image)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/upload/:id", delete(handlers::upload::delete_file))
        .nest_service("/uploads", uploads)
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(state)
}
