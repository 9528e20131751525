//! # Signup, Login and Logout
//!
//! ## How it works
//! - Signup validates the form and creates the user; a taken email re-renders the form.
//! - Login checks the credentials, cycles the session id and stores the user id.
//! - Logout cycles the session id again and drops the user id.
//!
//! Every outcome that changes the session ends in a 303 redirect with a flash message.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::db::models::ModelError;
use crate::error::AppResult;
use crate::forms::{LoginForm, SignupForm};
use crate::handlers::{template_data, unprocessable, FLASH};
use crate::middleware::auth::{
    CurrentUser, AUTHENTICATED_USER_ID, LOGIN_PATH, REDIRECT_PATH_AFTER_LOGIN,
};
use crate::state::AppState;
use crate::templates;

// Signup

/// GET /user/signup
pub async fn signup(session: Session, current_user: CurrentUser) -> AppResult<Response> {
    let data = template_data(&session, current_user).await?;

    Ok(templates::signup(&data, &SignupForm::default()).into_response())
}

/// POST /user/signup
pub async fn signup_post(
    State(state): State<AppState>,
    session: Session,
    current_user: CurrentUser,
    form: Result<Form<SignupForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(mut form) = form?;

    form.validate();
    if form.validator.valid() {
        match state
            .users
            .insert(&form.name, &form.email, &form.password)
            .await
        {
            Ok(()) => {
                session
                    .insert(FLASH, "Your signup was successful. Please log in.")
                    .await?;
                return Ok(Redirect::to(LOGIN_PATH).into_response());
            }
            Err(ModelError::DuplicateEmail) => {
                form.validator
                    .add_field_error("email", "Email address is already in use");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = template_data(&session, current_user).await?;
    Ok(unprocessable(templates::signup(&data, &form)))
}

// Login and logout

/// GET /user/login
pub async fn login(session: Session, current_user: CurrentUser) -> AppResult<Response> {
    let data = template_data(&session, current_user).await?;

    Ok(templates::login(&data, &LoginForm::default()).into_response())
}

/// POST /user/login
///
/// On success the session id is cycled before the user id is stored, and the user is sent back
/// to the page that bounced them to the login form, if any.
pub async fn login_post(
    State(state): State<AppState>,
    session: Session,
    current_user: CurrentUser,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(mut form) = form?;

    form.validate();
    if form.validator.valid() {
        match state.users.authenticate(&form.email, &form.password).await {
            Ok(user_id) => {
                session.cycle_id().await?;
                session.insert(AUTHENTICATED_USER_ID, user_id).await?;

                let target = session
                    .remove::<String>(REDIRECT_PATH_AFTER_LOGIN)
                    .await?
                    .unwrap_or_else(|| "/snippet/create".to_string());
                tracing::info!(user_id, "user logged in");
                return Ok(Redirect::to(&target).into_response());
            }
            Err(ModelError::InvalidCredentials) => {
                form.validator
                    .add_non_field_error("Email or password is incorrect");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = template_data(&session, current_user).await?;
    Ok(unprocessable(templates::login(&data, &form)))
}

/// POST /user/logout
pub async fn logout_post(session: Session, current_user: CurrentUser) -> AppResult<Response> {
    session.cycle_id().await?;
    session.remove::<i64>(AUTHENTICATED_USER_ID).await?;
    session
        .insert(FLASH, "You've been logged out successfully!")
        .await?;

    if let Some(user_id) = current_user.id() {
        tracing::info!(user_id, "user logged out");
    }
    Ok(Redirect::to("/").into_response())
}
