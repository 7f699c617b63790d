//! API surface integration tests.
//!
//! Covers the 401/403 session checks on mutation endpoints and the
//! validation envelope, all of which are decided before any query runs.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, TestContext};
use serde_json::json;
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
async fn test_create_project_without_session_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .send(json_request(Method::POST, "/projects", None, json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(body["status"], "error");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_create_project_with_invalid_token_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .send(json_request(
            Method::POST,
            "/projects",
            Some("zelo_session=not-a-token"),
            json!({}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_project_as_member_is_forbidden() {
    let ctx = TestContext::new();
    let cookie = ctx.cookie_for(Role::Member);

    let response = ctx
        .send(json_request(
            Method::POST,
            "/projects",
            Some(&cookie),
            json!({}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Forbidden");
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_create_project_lists_every_missing_field() {
    let ctx = TestContext::new();
    let cookie = ctx.cookie_for(Role::Admin);

    let response = ctx
        .send(json_request(
            Method::POST,
            "/projects",
            Some(&cookie),
            json!({}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid input");
    assert_eq!(body["status"], "error");

    let issues = body["issues"].as_array().expect("issues should be listed");
    let fields: Vec<&str> = issues
        .iter()
        .map(|issue| issue["field"].as_str().unwrap())
        .collect();
    for field in ["title", "description", "category", "long_description"] {
        assert!(fields.contains(&field), "missing issue for {field}");
    }
}

#[tokio::test]
async fn test_list_users_as_member_is_forbidden() {
    let ctx = TestContext::new();
    let cookie = ctx.cookie_for(Role::Member);

    let response = ctx
        .send(
            Request::builder()
                .method(Method::GET)
                .uri("/users")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_testimonial_as_member_is_forbidden() {
    let ctx = TestContext::new();
    let cookie = ctx.cookie_for(Role::Member);

    let response = ctx
        .send(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!(
                    "/testimonials/{}",
                    uuid::Uuid::new_v4()
                ))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_change_own_role() {
    let ctx = TestContext::new();
    let id = uuid::Uuid::new_v4();
    let cookie = ctx.cookie_with_id(Role::Admin, id);

    let response = ctx
        .send(json_request(
            Method::PUT,
            &format!("/users/{id}"),
            Some(&cookie),
            json!({ "role": "MEMBER" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Cannot change your own role.");
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let ctx = TestContext::new();
    let id = uuid::Uuid::new_v4();
    let cookie = ctx.cookie_with_id(Role::Admin, id);

    let response = ctx
        .send(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/users/{id}"))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "You cannot delete your own account.");
}

#[tokio::test]
async fn test_register_rejects_short_password_and_bad_email() {
    let ctx = TestContext::new();

    let response = ctx
        .send(json_request(
            Method::POST,
            "/register",
            None,
            json!({ "name": "Ada", "email": "not-an-email", "password": "abc" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid input");

    let issues = body["issues"].as_array().expect("issues should be listed");
    let fields: Vec<&str> = issues
        .iter()
        .map(|issue| issue["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn test_register_with_empty_body_reports_all_fields() {
    let ctx = TestContext::new();

    let response = ctx
        .send(json_request(Method::POST, "/register", None, json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let issues = body["issues"].as_array().expect("issues should be listed");
    assert!(issues.len() >= 3);
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let ctx = TestContext::new();

    let response = ctx
        .send(json_request(
            Method::POST,
            "/login",
            None,
            json!({ "email": "nope", "password": "secret1" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_the_session_cookie() {
    let ctx = TestContext::new();
    let cookie = ctx.cookie_for(Role::Member);

    let response = ctx
        .send(json_request(Method::POST, "/logout", Some(&cookie), json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout should reset the cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("zelo_session="));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged out successfully");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_profile_update_without_session_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .send(json_request(
            Method::PUT,
            "/user/update",
            None,
            json!({ "name": "New Name" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_member_cannot_change_email_through_profile() {
    let ctx = TestContext::new();
    let cookie = ctx.cookie_for(Role::Member);

    let response = ctx
        .send(json_request(
            Method::PUT,
            "/user/update",
            Some(&cookie),
            json!({ "email": "new@example.com" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Forbidden. You can only update your name."
    );
}

#[tokio::test]
async fn test_profile_update_with_no_fields_is_rejected() {
    let ctx = TestContext::new();
    let cookie = ctx.cookie_for(Role::Member);

    let response = ctx
        .send(json_request(
            Method::PUT,
            "/user/update",
            Some(&cookie),
            json!({}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "No fields to update");
}

#[tokio::test]
async fn test_upload_without_session_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/upload")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_reads_do_not_require_a_session() {
    let ctx = TestContext::new();

    // Lazy pool, no server behind it: the handler reaches the database and
    // the connection attempt fails, which must surface as a 500 envelope
    // rather than an auth error.
    let response = ctx
        .send(
            Request::builder()
                .method(Method::GET)
                .uri("/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert_ne!(response.status(), StatusCode::FORBIDDEN);
}
