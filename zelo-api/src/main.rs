//! # Zelo API Server
//!
//! Backend for the Zelo marketing/portfolio site: public project and
//! testimonial reads, credential login with cookie sessions, role-gated
//! dashboards, and admin CRUD over projects, testimonials, and users.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/zelo \
//! SESSION_SECRET=$(openssl rand -hex 32) \
//! cargo run -p zelo-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zelo_api::{
    app::{build_router, AppState},
    config::Config,
};
use zelo_shared::db::{create_pool, run_migrations, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zelo_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Zelo API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
