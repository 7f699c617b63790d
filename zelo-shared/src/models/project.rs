//! Project model and database operations.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE projects (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     slug VARCHAR(50) NOT NULL,
//!     title VARCHAR(255) NOT NULL,
//!     category VARCHAR(255) NOT NULL,
//!     image VARCHAR(512) NOT NULL,
//!     description TEXT NOT NULL,
//!     long_description TEXT NOT NULL,
//!     tags TEXT[] NOT NULL DEFAULT '{}',
//!     live_preview VARCHAR(512) NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! The slug is derived from the title, never supplied by clients, and is
//! recomputed whenever the title changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Fallback image when a project is created without one.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400.png";

/// Fallback live-preview link; renders as a dead anchor on the site.
pub const PLACEHOLDER_LINK: &str = "#";

const SLUG_MAX_LEN: usize = 50;

/// A portfolio project.
///
/// Serialized camelCase (`longDescription`, `livePreview`) to match the
/// public site's wire format.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    /// URL-safe identifier derived from the title
    pub slug: String,

    pub title: String,

    pub category: String,

    pub image: String,

    pub description: String,

    pub long_description: String,

    pub tags: Vec<String>,

    pub live_preview: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project; optional fields fall back to placeholders
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub category: String,
    pub description: String,
    pub long_description: String,
    pub tags: Option<Vec<String>>,
    pub live_preview: Option<String>,
    pub image: Option<String>,
}

/// Input for updating a project; only non-None fields change
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub live_preview: Option<String>,
    pub image: Option<String>,
}

/// Derives a URL slug from a title: lowercased, runs of whitespace collapsed
/// to single hyphens, truncated to 50 characters. Surrounding whitespace is
/// not trimmed, so a padded title yields leading/trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_space = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !last_was_space {
                slug.push('-');
                last_was_space = true;
            }
        } else {
            slug.push(c);
            last_was_space = false;
        }
    }

    slug.chars().take(SLUG_MAX_LEN).collect()
}

const PROJECT_COLUMNS: &str = "id, slug, title, category, image, description, long_description, tags, live_preview, created_at, updated_at";

impl Project {
    /// Inserts a new project, deriving the slug and applying defaults for
    /// omitted optional fields.
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let slug = slugify(&data.title);

        sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (slug, title, category, image, description, long_description, tags, live_preview)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(slug)
        .bind(data.title)
        .bind(data.category)
        .bind(data.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()))
        .bind(data.description)
        .bind(data.long_description)
        .bind(data.tags.unwrap_or_default())
        .bind(
            data.live_preview
                .unwrap_or_else(|| PLACEHOLDER_LINK.to_string()),
        )
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists all projects, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Updates a project; only non-None fields change. A new title also
    /// recomputes the slug. Returns None if the id has no matching record.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let slug = data.title.as_deref().map(slugify);

        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
            bind_count += 1;
            query.push_str(&format!(", slug = ${}", bind_count));
        }
        if data.category.is_some() {
            bind_count += 1;
            query.push_str(&format!(", category = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.long_description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", long_description = ${}", bind_count));
        }
        if data.tags.is_some() {
            bind_count += 1;
            query.push_str(&format!(", tags = ${}", bind_count));
        }
        if data.live_preview.is_some() {
            bind_count += 1;
            query.push_str(&format!(", live_preview = ${}", bind_count));
        }
        if data.image.is_some() {
            bind_count += 1;
            query.push_str(&format!(", image = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {PROJECT_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
            q = q.bind(slug.unwrap_or_default());
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(long_description) = data.long_description {
            q = q.bind(long_description);
        }
        if let Some(tags) = data.tags {
            q = q.bind(tags);
        }
        if let Some(live_preview) = data.live_preview {
            q = q.bind(live_preview);
        }
        if let Some(image) = data.image {
            q = q.bind(image);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a project, returning the removed record (None on miss).
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "DELETE FROM projects WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
