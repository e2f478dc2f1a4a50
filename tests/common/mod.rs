#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use blog_backend::config::AppConfig;
use blog_backend::infrastructure::database::run_migrations;
use blog_backend::services::storage::LocalStorageService;
use blog_backend::{AppState, create_app};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----blogtestboundary";

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
    pub config: AppConfig,
    // Keeps the upload directory alive for the duration of the test
    pub upload_dir: TempDir,
}

pub async fn setup() -> TestApp {
    setup_with(|_| {}).await
}

/// Fresh in-memory database and upload directory; `customize` tweaks the config
pub async fn setup_with(customize: impl FnOnce(&mut AppConfig)) -> TestApp {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let upload_dir = tempfile::tempdir().unwrap();

    let mut config = AppConfig::development();
    config.upload_dir = upload_dir.path().to_path_buf();
    config.base_url = "http://localhost:3000".to_string();
    customize(&mut config);

    let mut opt = ConnectOptions::new(&config.database.url);
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    run_migrations(&db).await.unwrap();

    let storage = Arc::new(LocalStorageService::new(config.upload_dir.clone()));
    let state = AppState::new(db.clone(), storage, config.clone());

    TestApp {
        app: create_app(state),
        db,
        config,
        upload_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request("GET", uri)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request("DELETE", uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PUT", uri, body)).await
    }

    /// Creates an article and returns its id
    pub async fn create_article(&self, title: &str, date: &str) -> i64 {
        let (status, json) = self
            .post_json(
                "/api/articles",
                serde_json::json!({
                    "title": title,
                    "content": format!("Body of {}", title),
                    "date": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", json);
        json["data"]["id"].as_i64().unwrap()
    }

    pub async fn upload(&self, filename: &str, content_type: &str, data: &[u8]) -> (StatusCode, Value) {
        self.send(multipart_request(
            "/api/upload",
            "file",
            filename,
            content_type,
            data,
        ))
        .await
    }
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(
    uri: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, filename, content_type, data)))
        .unwrap()
}
