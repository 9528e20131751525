//! # Application State
//!
//! The shared state handed to every handler and to the authentication middleware.
//!
//! Both stores sit behind `Arc<dyn ...>` so a clone of `AppState` per request only copies two
//! pointers, and so tests can substitute in-memory stores for the SQLite ones.

use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::db::snippets::{SnippetStore, SqliteSnippets};
use crate::db::users::{SqliteUsers, UserStore};

/// Shared application state
///
/// Read-only after startup; all mutable data lives in the stores, which handle their own
/// concurrency.
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<dyn SnippetStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// State backed by the SQLite stores sharing one connection pool.
    pub fn new(db: SqlitePool) -> Self {
        Self::with_stores(
            Arc::new(SqliteSnippets::new(db.clone())),
            Arc::new(SqliteUsers::new(db)),
        )
    }

    pub fn with_stores(snippets: Arc<dyn SnippetStore>, users: Arc<dyn UserStore>) -> Self {
        AppState { snippets, users }
    }
}
