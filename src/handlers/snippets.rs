//! # Snippet Handlers
//!
//! Viewing is public; the create form and its submission sit behind the authorization gate.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::db::models::ModelError;
use crate::error::{AppError, AppResult};
use crate::forms::SnippetCreateForm;
use crate::handlers::{template_data, unprocessable, FLASH};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::templates;

/// GET /snippet/view/{id}
///
/// Anything but a positive integer id is a 404, as is an unknown or expired snippet.
pub async fn view(
    State(state): State<AppState>,
    session: Session,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = id
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or(AppError::NotFound)?;

    let snippet = match state.snippets.get(id).await {
        Ok(snippet) => snippet,
        Err(ModelError::NoRecord) => return Err(AppError::NotFound),
        Err(e) => return Err(e.into()),
    };

    let data = template_data(&session, current_user).await?;
    Ok(templates::snippet_view(&data, &snippet).into_response())
}

/// GET /snippet/create
pub async fn create(session: Session, current_user: CurrentUser) -> AppResult<Response> {
    let data = template_data(&session, current_user).await?;

    Ok(templates::snippet_create(&data, &SnippetCreateForm::new()).into_response())
}

/// POST /snippet/create
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    current_user: CurrentUser,
    form: Result<Form<SnippetCreateForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(mut form) = form?;

    form.validate();
    if !form.validator.valid() {
        let data = template_data(&session, current_user).await?;
        return Ok(unprocessable(templates::snippet_create(&data, &form)));
    }

    let id = state
        .snippets
        .insert(&form.title, &form.content, form.expires)
        .await?;
    session.insert(FLASH, "Snippet successfully created!").await?;

    Ok(Redirect::to(&format!("/snippet/view/{id}")).into_response())
}
