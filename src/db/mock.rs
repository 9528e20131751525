//! In-memory stand-ins for the SQLite stores, used by the router tests.
//!
//! Snippet 1 and user 1 (alice@example.com / `pa$$word`) always exist;
//! `dupe@example.com` is always taken.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::db::models::{ModelError, ModelResult, Snippet, User};
use crate::db::snippets::SnippetStore;
use crate::db::users::UserStore;

pub const MOCK_SNIPPET_CONTENT: &str = "An old silent pond...";

fn mock_snippet() -> Snippet {
    let created = Utc::now();
    Snippet {
        id: 1,
        title: "An old silent pond".to_string(),
        content: MOCK_SNIPPET_CONTENT.to_string(),
        created,
        expires: created + Duration::days(365),
    }
}

/// Records every inserted title so tests can assert on side effects.
#[derive(Default)]
pub struct MockSnippets {
    pub inserted: Mutex<Vec<String>>,
}

#[async_trait]
impl SnippetStore for MockSnippets {
    async fn insert(&self, title: &str, _content: &str, _expires_days: i64) -> ModelResult<i64> {
        self.inserted.lock().unwrap().push(title.to_string());
        Ok(2)
    }

    async fn get(&self, id: i64) -> ModelResult<Snippet> {
        match id {
            1 => Ok(mock_snippet()),
            _ => Err(ModelError::NoRecord),
        }
    }

    async fn latest(&self) -> ModelResult<Vec<Snippet>> {
        Ok(vec![mock_snippet()])
    }
}

/// Records inserted emails and the ids whose password changed.
#[derive(Default)]
pub struct MockUsers {
    pub inserted: Mutex<Vec<String>>,
    pub password_updates: Mutex<Vec<i64>>,
}

#[async_trait]
impl UserStore for MockUsers {
    async fn insert(&self, _name: &str, email: &str, _password: &str) -> ModelResult<()> {
        if email == "dupe@example.com" {
            return Err(ModelError::DuplicateEmail);
        }
        self.inserted.lock().unwrap().push(email.to_string());
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> ModelResult<i64> {
        if email == "alice@example.com" && password == "pa$$word" {
            return Ok(1);
        }
        Err(ModelError::InvalidCredentials)
    }

    async fn exists(&self, id: i64) -> ModelResult<bool> {
        Ok(id == 1)
    }

    async fn get(&self, id: i64) -> ModelResult<User> {
        match id {
            1 => Ok(User {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                created: Utc::now(),
            }),
            _ => Err(ModelError::NoRecord),
        }
    }

    async fn password_update(
        &self,
        id: i64,
        current_password: &str,
        _new_password: &str,
    ) -> ModelResult<()> {
        if id != 1 || current_password != "pa$$word" {
            return Err(ModelError::InvalidCredentials);
        }
        self.password_updates.lock().unwrap().push(id);
        Ok(())
    }
}
