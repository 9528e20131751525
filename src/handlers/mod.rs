//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `health`: liveness endpoint (`/ping`)
//! - `pages`: home and about pages
//! - `snippets`: viewing and creating snippets
//! - `auth`: signup, login, logout
//! - `users`: the logged-in user's account pages
//!
//! Handlers receive the session and the `CurrentUser` attached by the middleware, render maud
//! templates and return `AppResult<Response>`. Failed form submissions re-render the form with
//! 422; successful ones queue a flash message and redirect with 303.

pub mod auth;
pub mod health;
pub mod pages;
pub mod snippets;
pub mod users;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Datelike, Utc};
use maud::Markup;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::middleware::{auth::CurrentUser, csrf};
use crate::templates::TemplateData;

/// Session key for the one-shot message shown on the next rendered page
pub const FLASH: &str = "flash";

/// Collects the per-request data every page needs.
///
/// Pops the flash message, so it is shown exactly once.
pub async fn template_data(session: &Session, current_user: CurrentUser) -> AppResult<TemplateData> {
    Ok(TemplateData {
        current_year: Utc::now().year(),
        flash: session.remove::<String>(FLASH).await?,
        is_authenticated: current_user.is_authenticated(),
        csrf_token: csrf::token(session).await?,
    })
}

/// A re-rendered form with validation errors
fn unprocessable(markup: Markup) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, markup).into_response()
}

/// Fallback for paths no route matches
pub async fn not_found() -> AppError {
    AppError::NotFound
}
