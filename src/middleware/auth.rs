//! # Authentication Middleware
//!
//! Two layers share the session key `authenticatedUserID`:
//!
//! ## How it works
//! 1. `authenticate` (dynamic chain) reads the id from the session, checks the user still exists,
//!    and attaches a `CurrentUser` to the request extensions. Handlers extract it directly.
//! 2. `require_authentication` (protected chain only) sends anonymous visitors to the login page
//!    before the handler runs, remembering GET paths so login can return them there.
//!
//! A stale or unreadable id is not an error: the request simply continues as anonymous.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppResult;
use crate::state::AppState;

/// Session key holding the logged-in user's id
pub const AUTHENTICATED_USER_ID: &str = "authenticatedUserID";

/// Session key holding the page to return to after logging in
pub const REDIRECT_PATH_AFTER_LOGIN: &str = "redirectPathAfterLogin";

pub const LOGIN_PATH: &str = "/user/login";

/// Who is making the current request
///
/// Attached to the request extensions by [`authenticate`] and rebuilt on every request; it is
/// never cached in the session. Extracting it outside the dynamic chain yields an anonymous user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrentUser {
    id: Option<i64>,
}

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self { id: None }
    }

    pub fn authenticated(id: i64) -> Self {
        Self { id: Some(id) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .unwrap_or_default())
    }
}

/// Resolves the session's user id into a [`CurrentUser`].
///
/// The id only counts if the user still exists. A missing or unreadable id means anonymous;
/// only a failing user store surfaces as an error.
pub async fn authenticate(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let user_id = session
        .get::<i64>(AUTHENTICATED_USER_ID)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unreadable session user id, continuing as anonymous");
            None
        });

    let current_user = match user_id {
        Some(id) if state.users.exists(id).await? => CurrentUser::authenticated(id),
        Some(id) => {
            tracing::debug!(user_id = id, "session refers to a missing user");
            CurrentUser::anonymous()
        }
        None => CurrentUser::anonymous(),
    };

    request.extensions_mut().insert(current_user);
    Ok(next.run(request).await)
}

/// Gate for protected routes.
///
/// Anonymous requests are redirected to the login page (303) and the handler never runs; for
/// GET requests the path is remembered so login can send the user back. Authenticated responses
/// are marked `Cache-Control: no-store`.
pub async fn require_authentication(
    current_user: CurrentUser,
    session: Session,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    if !current_user.is_authenticated() {
        if request.method() == Method::GET {
            let path = request.uri().path().to_owned();
            session.insert(REDIRECT_PATH_AFTER_LOGIN, path).await?;
        }
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}
