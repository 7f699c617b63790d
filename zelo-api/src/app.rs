//! Application state and router builder.
//!
//! # Router layout
//!
//! ```text
//! /
//! ├── /health                       # public
//! ├── /register, /login, /logout    # public auth surface
//! ├── /projects, /testimonials      # GET public; mutations need ADMIN session
//! ├── /users                        # ADMIN session only
//! ├── /user/update, /upload         # any session (401 surface)
//! └── /dashboard, /admin/dashboard  # route guard (redirect surface)
//! ```
//!
//! The guard and session layers come from `zelo_shared::auth::middleware`;
//! admin checks inside handlers go through the shared `require_admin`
//! predicate. Tracing and CORS wrap the whole router.

use crate::config::Config;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use zelo_shared::auth::middleware::{page_guard, require_session};

/// Shared application state, cloned per request.
///
/// The config is the only process-wide state besides the pool; it is loaded
/// once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Signing key for session tokens.
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let secret = state.config.session.secret.clone();

    // Public surface: health, auth entry points, reads.
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", post(routes::auth::logout))
        .route("/projects", get(routes::projects::list_projects))
        .route("/projects/:id", get(routes::projects::get_project))
        .route(
            "/testimonials",
            get(routes::testimonials::list_testimonials),
        )
        .route(
            "/testimonials/:id",
            get(routes::testimonials::get_testimonial),
        );

    // Any authenticated session; missing/invalid cookie answers 401.
    let session_routes = Router::new()
        .route("/user/update", put(routes::profile::update_profile))
        .route("/upload", post(routes::upload::upload))
        .layer(middleware::from_fn(require_session(secret.clone())));

    // Admin mutations. The layer establishes the session; the handlers run
    // the shared require_admin predicate, answering 403 for members.
    let admin_routes = Router::new()
        .route("/projects", post(routes::projects::create_project))
        .route(
            "/projects/:id",
            put(routes::projects::update_project).delete(routes::projects::delete_project),
        )
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route(
            "/testimonials",
            post(routes::testimonials::create_testimonial),
        )
        .route(
            "/testimonials/:id",
            put(routes::testimonials::update_testimonial)
                .delete(routes::testimonials::delete_testimonial),
        )
        .layer(middleware::from_fn(require_session(secret.clone())));

    // Dashboard pages behind the redirect-surface guard.
    let page_routes = Router::new()
        .route("/dashboard", get(routes::pages::member_dashboard))
        .route("/admin/dashboard", get(routes::pages::admin_dashboard))
        .layer(middleware::from_fn(page_guard(secret)));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .merge(page_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
