mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use blog_backend::entities::prelude::*;
use http_body_util::BodyExt;
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::ServiceExt;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n fake image payload";

fn stored_name(url: &str) -> String {
    url.rsplit('/').next().unwrap().to_string()
}

#[tokio::test]
async fn test_upload_image_and_serve_it() {
    let t = common::setup().await;

    let (status, json) = t.upload("cat.PNG", "image/png", PNG_BYTES).await;
    assert_eq!(status, StatusCode::OK, "{}", json);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["filename"], "cat.PNG");
    assert_eq!(json["data"]["size"], PNG_BYTES.len());

    let url = json["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:3000/uploads/file_"));
    assert!(url.ends_with(".png"));

    let name = stored_name(url);
    assert!(t.upload_dir.path().join(&name).exists());

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/uploads/{}", name))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], PNG_BYTES);

    let (status, json) = t.get("/api/upload").await;
    assert_eq!(status, StatusCode::OK);
    let files = json["data"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["original_name"], "cat.PNG");
    assert_eq!(files[0]["file_type"], "image/png");
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let t = common::setup().await;

    let (status, json) = t.upload("notes.txt", "text/plain", b"hello").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Only image files can be uploaded");

    assert_eq!(Files::find().count(&t.db).await.unwrap(), 0);
    assert_eq!(std::fs::read_dir(t.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let t = common::setup_with(|config| config.max_file_size = 1024).await;

    let (status, json) = t.upload("big.png", "image/png", &[0u8; 2048]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    assert_eq!(Files::find().count(&t.db).await.unwrap(), 0);
    assert_eq!(std::fs::read_dir(t.upload_dir.path()).unwrap().count(), 0);

    let (status, _) = t.upload("small.png", "image/png", &[0u8; 1024]).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let t = common::setup().await;

    let request = common::multipart_request("/api/upload", "avatar", "cat.png", "image/png", PNG_BYTES);
    let (status, json) = t.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Please choose a file to upload");

    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header("Content-Type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, json) = t.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_upload_rejects_second_file_part() {
    let t = common::setup().await;

    let mut body = common::multipart_body("file", "one.png", "image/png", PNG_BYTES);
    // Drop the closing boundary so a second part can follow
    body.truncate(body.len() - format!("--{}--\r\n", common::BOUNDARY).len());
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"two.png\"\r\n\
             Content-Type: image/png\r\n\r\n",
            common::BOUNDARY
        )
        .as_bytes(),
    );
    body.extend_from_slice(PNG_BYTES);
    body.extend_from_slice(format!("\r\n--{}--\r\n", common::BOUNDARY).as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", common::BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, json) = t.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Only one file can be uploaded at a time");

    assert_eq!(Files::find().count(&t.db).await.unwrap(), 0);
    assert_eq!(std::fs::read_dir(t.upload_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_delete_file_tolerates_missing_object() {
    let t = common::setup().await;

    let (_, json) = t.upload("gone.png", "image/png", PNG_BYTES).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let name = stored_name(json["data"]["url"].as_str().unwrap());

    std::fs::remove_file(t.upload_dir.path().join(&name)).unwrap();

    let (status, json) = t.delete(&format!("/api/upload/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(Files::find().count(&t.db).await.unwrap(), 0);

    let (status, _) = t.delete(&format!("/api/upload/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file_removes_object() {
    let t = common::setup().await;

    let (_, json) = t.upload("keep.png", "image/png", PNG_BYTES).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let name = stored_name(json["data"]["url"].as_str().unwrap());

    let (status, _) = t.delete(&format!("/api/upload/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!t.upload_dir.path().join(&name).exists());
}
