//! # Database Models
//!
//! Row types returned by the data layer and the errors it can report.
//!
//! Timestamps are `DateTime<Utc>`; SQLx stores them as RFC3339 text in SQLite, so they sort
//! and compare correctly inside SQL queries.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A short text snippet
///
/// Snippets are immutable once created and stop being visible after `expires`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// A registered user
///
/// The password hash is not part of the row type; it is only read inside the data layer
/// when checking credentials.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub name: String,
    pub email: String,
    pub created: DateTime<Utc>,
}

/// Data-layer error type
///
/// The first three variants are expected outcomes that handlers branch on; the remaining ones
/// are genuine failures.
#[derive(Error, Debug)]
pub enum ModelError {
    /// No row matched the lookup
    #[error("no matching record found")]
    NoRecord,

    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email address is already registered
    #[error("duplicate email")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// The blocking task running a bcrypt call panicked or was cancelled
    #[error("password hashing task failed: {0}")]
    HashTask(#[from] tokio::task::JoinError),
}

pub type ModelResult<T> = Result<T, ModelError>;
