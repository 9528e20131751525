//! # Snippet Storage
//!
//! Expired snippets are never returned: every query filters on `expires > now`.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::db::models::{ModelError, ModelResult, Snippet};

/// Number of snippets shown on the home page
const LATEST_LIMIT: i64 = 10;

/// Snippet persistence
///
/// Shared by every request through `AppState`; implementations must be safe to call
/// concurrently.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Stores a new snippet that expires `expires_days` from now and returns its id.
    async fn insert(&self, title: &str, content: &str, expires_days: i64) -> ModelResult<i64>;

    /// Fetches a non-expired snippet, or `ModelError::NoRecord`.
    async fn get(&self, id: i64) -> ModelResult<Snippet>;

    /// The most recently created non-expired snippets, newest first.
    async fn latest(&self) -> ModelResult<Vec<Snippet>>;
}

/// SQLite-backed snippet store
#[derive(Clone)]
pub struct SqliteSnippets {
    pool: SqlitePool,
}

impl SqliteSnippets {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetStore for SqliteSnippets {
    async fn insert(&self, title: &str, content: &str, expires_days: i64) -> ModelResult<i64> {
        let created = Utc::now();
        let expires = created + Duration::days(expires_days);

        let result = sqlx::query(
            "INSERT INTO snippets (title, content, created, expires)
             VALUES (?, ?, ?, ?)",
        )
        .bind(title)
        .bind(content)
        .bind(created)
        .bind(expires)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get(&self, id: i64) -> ModelResult<Snippet> {
        let snippet = sqlx::query_as::<_, Snippet>(
            "SELECT id, title, content, created, expires FROM snippets
             WHERE expires > ? AND id = ?",
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ModelError::NoRecord,
            _ => ModelError::Database(e),
        })?;

        Ok(snippet)
    }

    async fn latest(&self) -> ModelResult<Vec<Snippet>> {
        let snippets = sqlx::query_as::<_, Snippet>(
            "SELECT id, title, content, created, expires FROM snippets
             WHERE expires > ?
             ORDER BY id DESC
             LIMIT ?",
        )
        .bind(Utc::now())
        .bind(LATEST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(snippets)
    }
}
