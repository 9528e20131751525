//! Static-ish pages: the home listing and the about page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::AppResult;
use crate::handlers::template_data;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::templates;

/// GET /
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    current_user: CurrentUser,
) -> AppResult<Response> {
    let snippets = state.snippets.latest().await?;
    let data = template_data(&session, current_user).await?;

    Ok(templates::home(&data, &snippets).into_response())
}

/// GET /about
pub async fn about(session: Session, current_user: CurrentUser) -> AppResult<Response> {
    let data = template_data(&session, current_user).await?;

    Ok(templates::about(&data).into_response())
}
