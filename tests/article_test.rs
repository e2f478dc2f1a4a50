mod common;

use axum::http::StatusCode;
use blog_backend::entities::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

#[tokio::test]
async fn test_create_and_fetch_article() {
    let t = common::setup().await;

    let (status, json) = t
        .post_json(
            "/api/articles",
            json!({
                "title": "Hello",
                "content": "# Markdown body",
                "date": "2025-09-25"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["title"], "Hello");
    assert_eq!(json["data"]["date"], "2025-09-25");
    let id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = t.get(&format!("/api/articles/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["title"], "Hello");
    assert_eq!(json["data"]["content"], "# Markdown body");
    assert_eq!(json["data"]["date"], "2025-09-25");

    let (status, json) = t.get("/api/articles").await;
    assert_eq!(status, StatusCode::OK);
    let list = json["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert!(list[0]["summary"].is_null());
    assert!(list[0].get("content").is_none());
}

#[tokio::test]
async fn test_create_article_missing_fields_persists_nothing() {
    let t = common::setup().await;

    for body in [
        json!({"content": "c", "date": "2025-09-25"}),
        json!({"title": "t", "date": "2025-09-25"}),
        json!({"title": "t", "content": "c"}),
        json!({"title": "", "content": "c", "date": "2025-09-25"}),
    ] {
        let (status, json) = t.post_json("/api/articles", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].is_string());
        assert!(!json["errors"].as_array().unwrap().is_empty());
    }

    assert_eq!(Articles::find().count(&t.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_article_rejects_bad_date_and_bad_json() {
    let t = common::setup().await;

    let (status, _) = t
        .post_json(
            "/api/articles",
            json!({"title": "t", "content": "c", "date": "25/09/2025"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/articles")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, json) = t.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    assert_eq!(Articles::find().count(&t.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let t = common::setup().await;

    t.create_article("Older", "2024-01-01").await;
    t.create_article("Newest", "2025-06-01").await;
    t.create_article("Middle", "2024-12-31").await;

    let (_, json) = t.get("/api/articles").await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Older"]);
}

#[tokio::test]
async fn test_missing_article_is_not_found() {
    let t = common::setup().await;

    let (status, json) = t.get("/api/articles/99999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Article not found");

    let (status, _) = t.put_json("/api/articles/99999", json!({"title": "X"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = t.delete("/api/articles/99999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let t = common::setup().await;

    let (status, json) = t.get("/api/articles/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let t = common::setup().await;

    let (_, json) = t
        .post_json(
            "/api/articles",
            json!({
                "title": "Original",
                "content": "Original content",
                "summary": "Original summary",
                "date": "2025-01-02"
            }),
        )
        .await;
    let id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = t
        .put_json(&format!("/api/articles/{}", id), json!({"title": "X"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert!(json["message"].is_string());

    let (_, json) = t.get(&format!("/api/articles/{}", id)).await;
    assert_eq!(json["data"]["title"], "X");
    assert_eq!(json["data"]["content"], "Original content");
    assert_eq!(json["data"]["date"], "2025-01-02");

    let (_, json) = t.get("/api/articles").await;
    assert_eq!(json["data"][0]["summary"], "Original summary");
}

#[tokio::test]
async fn test_update_clears_summary_and_rejects_empty_title() {
    let t = common::setup().await;

    let (_, json) = t
        .post_json(
            "/api/articles",
            json!({
                "title": "With summary",
                "content": "c",
                "summary": "short",
                "date": "2025-01-02"
            }),
        )
        .await;
    let id = json["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/articles/{}", id);

    let (status, _) = t.put_json(&uri, json!({"summary": ""})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, json) = t.get("/api/articles").await;
    assert!(json["data"][0]["summary"].is_null());

    let (status, json) = t.put_json(&uri, json!({"title": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);

    let (_, json) = t.get(&uri).await;
    assert_eq!(json["data"]["title"], "With summary");
}

#[tokio::test]
async fn test_delete_article_removes_comments() {
    let t = common::setup().await;

    let id = t.create_article("Doomed", "2025-02-02").await;
    for nickname in ["ann", "bob"] {
        let (status, _) = t
            .post_json(
                &format!("/api/comments/articles/{}/comments", id),
                json!({"nickname": nickname, "content": "hi"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(Comments::find().count(&t.db).await.unwrap(), 2);

    let (status, json) = t.delete(&format!("/api/articles/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    assert_eq!(Articles::find().count(&t.db).await.unwrap(), 0);
    assert_eq!(Comments::find().count(&t.db).await.unwrap(), 0);

    let (status, _) = t.delete(&format!("/api/articles/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
