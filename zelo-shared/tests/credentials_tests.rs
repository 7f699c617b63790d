//! Integration tests for credential verification.
//!
//! These tests require a running PostgreSQL database; the URL is taken from
//! the `DATABASE_URL` environment variable and the tests are skipped when it
//! is not set.

use sqlx::PgPool;
use uuid::Uuid;
use zelo_shared::auth::authorization::Role;
use zelo_shared::auth::credentials::verify_credentials;
use zelo_shared::auth::password::hash_password;
use zelo_shared::db::pool::{create_pool, DatabaseConfig};
use zelo_shared::db::run_migrations;
use zelo_shared::models::user::{CreateUser, User};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 2,
        connect_timeout_seconds: 10,
    })
    .await
    .expect("test database should be reachable");
    run_migrations(&pool).await.expect("migrations should apply");
    Some(pool)
}

async fn insert_user(pool: &PgPool, password: Option<&str>) -> User {
    let password_hash = password.map(|p| hash_password(p).expect("hash should succeed"));
    User::create(
        pool,
        CreateUser {
            name: "Credential Test".to_string(),
            email: format!("cred-{}@example.com", Uuid::new_v4()),
            password_hash,
            role: Role::Member,
        },
    )
    .await
    .expect("insert should succeed")
}

async fn remove_user(pool: &PgPool, id: Uuid) {
    User::delete(pool, id).await.expect("cleanup should succeed");
}

#[tokio::test]
async fn test_valid_credentials_yield_identity() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let user = insert_user(&pool, Some("correct-password")).await;

    let identity = verify_credentials(&pool, &user.email, "correct-password")
        .await
        .expect("verification should not error")
        .expect("credentials should match");
    assert_eq!(identity.id, user.id);
    assert_eq!(identity.email, user.email);

    remove_user(&pool, user.id).await;
}

#[tokio::test]
async fn test_rejections_are_indistinguishable() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let with_password = insert_user(&pool, Some("right-password")).await;
    let without_password = insert_user(&pool, None).await;

    // Wrong password, unknown email, and an empty password against a
    // password-less account all come back as the same bare rejection.
    let wrong = verify_credentials(&pool, &with_password.email, "wrong-password")
        .await
        .expect("verification should not error");
    let unknown = verify_credentials(&pool, "nobody@example.com", "any-password")
        .await
        .expect("verification should not error");
    let passwordless = verify_credentials(&pool, &without_password.email, "")
        .await
        .expect("verification should not error");

    assert!(wrong.is_none());
    assert!(unknown.is_none());
    assert!(passwordless.is_none());

    remove_user(&pool, with_password.id).await;
    remove_user(&pool, without_password.id).await;
}
