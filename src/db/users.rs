//! # User Storage
//!
//! Passwords are stored as bcrypt hashes and only ever compared inside this module.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::models::{ModelError, ModelResult, User};

/// User account persistence and credential checks
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Registers a user; `ModelError::DuplicateEmail` if the email is taken.
    async fn insert(&self, name: &str, email: &str, password: &str) -> ModelResult<()>;

    /// Returns the user id for matching credentials, or `ModelError::InvalidCredentials`.
    async fn authenticate(&self, email: &str, password: &str) -> ModelResult<i64>;

    async fn exists(&self, id: i64) -> ModelResult<bool>;

    async fn get(&self, id: i64) -> ModelResult<User>;

    /// Replaces the password after checking the current one.
    async fn password_update(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ModelResult<()>;
}

/// SQLite-backed user store with bcrypt password hashes
#[derive(Clone)]
pub struct SqliteUsers {
    pool: SqlitePool,
    cost: u32,
}

impl SqliteUsers {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_cost(pool, 12)
    }

    pub fn with_cost(pool: SqlitePool, cost: u32) -> Self {
        Self { pool, cost }
    }
}

// bcrypt is CPU-bound: run it on the blocking pool, not a runtime worker.
async fn hash_password(password: &str, cost: u32) -> ModelResult<String> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

async fn verify_password(password: &str, hash: String) -> ModelResult<bool> {
    let password = password.to_owned();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

#[async_trait]
impl UserStore for SqliteUsers {
    async fn insert(&self, name: &str, email: &str, password: &str) -> ModelResult<()> {
        let hashed_password = hash_password(password, self.cost).await?;

        sqlx::query(
            "INSERT INTO users (name, email, hashed_password, created)
             VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => ModelError::DuplicateEmail,
            _ => ModelError::Database(e),
        })?;

        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> ModelResult<i64> {
        let (id, hashed_password) = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, hashed_password FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ModelError::InvalidCredentials,
            _ => ModelError::Database(e),
        })?;

        if !verify_password(password, hashed_password).await? {
            return Err(ModelError::InvalidCredentials);
        }

        Ok(id)
    }

    async fn exists(&self, id: i64) -> ModelResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn get(&self, id: i64) -> ModelResult<User> {
        let user = sqlx::query_as::<_, User>("SELECT name, email, created FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => ModelError::NoRecord,
                _ => ModelError::Database(e),
            })?;

        Ok(user)
    }

    async fn password_update(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ModelResult<()> {
        let hashed_password =
            sqlx::query_scalar::<_, String>("SELECT hashed_password FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| match e {
                    sqlx::Error::RowNotFound => ModelError::NoRecord,
                    _ => ModelError::Database(e),
                })?;

        if !verify_password(current_password, hashed_password).await? {
            return Err(ModelError::InvalidCredentials);
        }

        let new_hash = hash_password(new_password, self.cost).await?;
        sqlx::query("UPDATE users SET hashed_password = ? WHERE id = ?")
            .bind(new_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
