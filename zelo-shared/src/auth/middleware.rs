//! Session middleware for Axum.
//!
//! The session token travels in a cookie. Two layers turn it into request
//! context:
//!
//! - [`page_guard`] protects page prefixes (`/admin`, `/dashboard`): it
//!   applies the [`super::guard`] policy table and answers with a redirect
//!   when the session is missing or the role does not fit. The protected
//!   handler never runs on a redirect.
//! - [`require_session`] protects JSON endpoints: a missing or invalid
//!   cookie yields a `401` error envelope instead of a redirect.
//!
//! Both insert the parsed [`SessionClaims`] into request extensions on
//! success, where handlers pick them up via `Extension<SessionClaims>`.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use super::{
    guard::{decide, RouteDecision},
    session::{parse_token, SessionClaims},
};

/// Name of the session cookie set at login and cleared at logout.
pub const SESSION_COOKIE: &str = "zelo_session";

/// Reads and parses the session cookie from a request, if any.
///
/// A missing cookie and an invalid token (bad signature, expired) are the
/// same thing here: no session. Parse failures never escape this boundary.
pub fn session_from_request(req: &Request, secret: &str) -> Option<SessionClaims> {
    let jar = CookieJar::from_headers(req.headers());
    let cookie = jar.get(SESSION_COOKIE)?;
    parse_token(cookie.value(), secret).ok()
}

async fn page_guard_middleware(secret: String, mut req: Request, next: Next) -> Response {
    let session = session_from_request(&req, &secret);

    match decide(req.uri().path(), session.as_ref()) {
        RouteDecision::Redirect(target) => Redirect::to(target).into_response(),
        RouteDecision::Allow => {
            if let Some(claims) = session {
                req.extensions_mut().insert(claims);
            }
            next.run(req).await
        }
    }
}

async fn require_session_middleware(secret: String, mut req: Request, next: Next) -> Response {
    match session_from_request(&req, &secret) {
        Some(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Unauthorized",
                "data": null,
                "status": "error",
            })),
        )
            .into_response(),
    }
}

/// Creates the redirect-surface guard layer for protected page prefixes.
pub fn page_guard(
    secret: impl Into<String>,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(page_guard_middleware(secret, req, next))
    }
}

/// Creates the 401-surface session layer for JSON endpoints.
pub fn require_session(
    secret: impl Into<String>,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(require_session_middleware(secret, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{
        authorization::Role,
        session::{mint_token, SessionClaims},
    };
    use axum::body::Body;
    use chrono::Duration;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn request_with_cookie(cookie: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/dashboard");
        if let Some(value) = cookie {
            builder = builder.header("cookie", format!("{}={}", SESSION_COOKIE, value));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_session_from_request_valid_cookie() {
        let claims = SessionClaims::new(
            Uuid::new_v4(),
            None,
            "a@example.com".to_string(),
            Role::Member,
            Duration::hours(1),
        );
        let token = mint_token(&claims, SECRET).unwrap();

        let req = request_with_cookie(Some(&token));
        let session = session_from_request(&req, SECRET).expect("should parse session");
        assert_eq!(session.sub, claims.sub);
    }

    #[test]
    fn test_session_from_request_missing_cookie() {
        let req = request_with_cookie(None);
        assert!(session_from_request(&req, SECRET).is_none());
    }

    #[test]
    fn test_session_from_request_garbage_cookie() {
        let req = request_with_cookie(Some("garbage"));
        assert!(session_from_request(&req, SECRET).is_none());
    }

    #[test]
    fn test_session_from_request_wrong_secret() {
        let claims = SessionClaims::new(
            Uuid::new_v4(),
            None,
            "a@example.com".to_string(),
            Role::Member,
            Duration::hours(1),
        );
        let token = mint_token(&claims, "another-secret-of-sufficient-len!!").unwrap();

        let req = request_with_cookie(Some(&token));
        assert!(session_from_request(&req, SECRET).is_none());
    }
}
