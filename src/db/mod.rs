//! # Database Module
//!
//! The data layer behind the web handlers:
//! - `models`: row types and the `ModelError` type
//! - `snippets`: the `SnippetStore` trait and its SQLite implementation
//! - `users`: the `UserStore` trait and its SQLite implementation
//!
//! Handlers only see the traits (through `AppState`), so tests can swap in the in-memory
//! fakes from `mock`.

pub mod models;
pub mod snippets;
pub mod users;

#[cfg(test)]
pub mod mock;

use anyhow::Result;
use sqlx::sqlite::SqlitePool;

/// Opens the connection pool and applies the embedded migrations from `./migrations`.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// A migrated in-memory database.
///
/// Limited to one connection: every SQLite `:memory:` connection is its own database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}
