//! # Account Handlers
//!
//! Pages for the logged-in user. All of them sit behind the authorization gate, so a
//! `CurrentUser` without an id only happens if the gate is bypassed; it is treated like a
//! logged-out visitor.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::db::models::ModelError;
use crate::error::AppResult;
use crate::forms::PasswordUpdateForm;
use crate::handlers::{template_data, unprocessable, FLASH};
use crate::middleware::auth::{CurrentUser, LOGIN_PATH};
use crate::state::AppState;
use crate::templates;

/// GET /account/view
pub async fn account_view(
    State(state): State<AppState>,
    session: Session,
    current_user: CurrentUser,
) -> AppResult<Response> {
    let Some(user_id) = current_user.id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    let user = match state.users.get(user_id).await {
        Ok(user) => user,
        Err(ModelError::NoRecord) => return Ok(Redirect::to(LOGIN_PATH).into_response()),
        Err(e) => return Err(e.into()),
    };

    let data = template_data(&session, current_user).await?;
    Ok(templates::account_view(&data, &user).into_response())
}

/// GET /account/password/update
pub async fn password_update(session: Session, current_user: CurrentUser) -> AppResult<Response> {
    let data = template_data(&session, current_user).await?;

    Ok(templates::password_update(&data, &PasswordUpdateForm::default()).into_response())
}

/// POST /account/password/update
pub async fn password_update_post(
    State(state): State<AppState>,
    session: Session,
    current_user: CurrentUser,
    form: Result<Form<PasswordUpdateForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(mut form) = form?;
    let Some(user_id) = current_user.id() else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    form.validate();
    if form.validator.valid() {
        match state
            .users
            .password_update(user_id, &form.current_password, &form.new_password)
            .await
        {
            Ok(()) => {
                session.insert(FLASH, "Your password has been updated!").await?;
                return Ok(Redirect::to("/account/view").into_response());
            }
            Err(ModelError::InvalidCredentials) => {
                form.validator
                    .add_field_error("current_password", "Current password is incorrect");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = template_data(&session, current_user).await?;
    Ok(unprocessable(templates::password_update(&data, &form)))
}
