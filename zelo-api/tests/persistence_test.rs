//! Persistence integration tests.
//!
//! These tests require a running PostgreSQL database; the URL is taken from
//! the `DATABASE_URL` environment variable and the tests are skipped when it
//! is not set.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, TestContext};
use serde_json::json;
use uuid::Uuid;
use zelo_shared::auth::authorization::Role;

fn json_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_duplicate_email_registration_conflicts_without_a_record() {
    let Some(ctx) = TestContext::with_database().await else {
        return;
    };

    let email = format!("dup-{}@example.com", Uuid::new_v4());
    let body = json!({ "name": "First", "email": email, "password": "secret1" });

    let first = ctx
        .send(json_request(Method::POST, "/register", None, body.clone()))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = ctx
        .send(json_request(Method::POST, "/register", None, body))
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let envelope = body_json(second).await;
    assert_eq!(envelope["message"], "User with this email already exists");
    assert_eq!(envelope["status"], "error");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&ctx.db)
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);

    sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(&email)
        .execute(&ctx.db)
        .await
        .expect("cleanup should succeed");
}

#[tokio::test]
async fn test_delete_missing_project_is_not_found_and_store_unchanged() {
    let Some(ctx) = TestContext::with_database().await else {
        return;
    };
    let cookie = ctx.cookie_for(Role::Admin);

    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&ctx.db)
        .await
        .expect("count should succeed");

    let response = ctx
        .send(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/projects/{}", Uuid::new_v4()))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let envelope = body_json(response).await;
    assert_eq!(envelope["message"], "Project not found");
    assert_eq!(envelope["status"], "error");
    assert!(envelope["data"].is_null());

    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&ctx.db)
        .await
        .expect("count should succeed");
    assert_eq!(before, after);
}
