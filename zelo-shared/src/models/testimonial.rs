//! Testimonial model and database operations.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE testimonials (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     name VARCHAR(255) NOT NULL,
//!     text TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A client testimonial shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,

    /// Who said it
    pub name: String,

    /// What they said
    pub text: String,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a testimonial
#[derive(Debug, Clone)]
pub struct CreateTestimonial {
    pub name: String,
    pub text: String,
}

/// Input for updating a testimonial; only non-None fields change
#[derive(Debug, Clone, Default)]
pub struct UpdateTestimonial {
    pub name: Option<String>,
    pub text: Option<String>,
}

impl Testimonial {
    pub async fn create(pool: &PgPool, data: CreateTestimonial) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (name, text)
            VALUES ($1, $2)
            RETURNING id, name, text, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.text)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, text, created_at FROM testimonials WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists all testimonials, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, text, created_at FROM testimonials ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Updates a testimonial; returns None if the id has no matching record.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTestimonial,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET name = COALESCE($2, name),
                text = COALESCE($3, text)
            WHERE id = $1
            RETURNING id, name, text, created_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.text)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a testimonial, returning the removed record (None on miss).
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            "DELETE FROM testimonials WHERE id = $1 RETURNING id, name, text, created_at",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
