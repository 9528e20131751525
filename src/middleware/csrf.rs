//! CSRF protection for form submissions.
//!
//! Each session gets one random token, minted the first time a page with a form is rendered.
//! Forms embed it as the hidden `csrf_token` field; every state-changing request must echo it
//! back. The guard runs before authentication, so anonymous forms (signup, login) are covered
//! the same way as authenticated ones.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tower_sessions::{session, Session};

use crate::error::{AppError, AppResult};

/// Name of the hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";

const CSRF_SESSION_KEY: &str = "csrfToken";

/// Largest form body the guard will buffer (1 MiB)
const MAX_FORM_BYTES: usize = 1024 * 1024;

#[derive(Deserialize)]
struct Submitted {
    csrf_token: Option<String>,
}

/// Returns the session's token, minting and storing one if needed.
pub async fn token(session: &Session) -> Result<String, session::Error> {
    if let Some(token) = session.get::<String>(CSRF_SESSION_KEY).await? {
        return Ok(token);
    }

    let token = generate_token();
    session.insert(CSRF_SESSION_KEY, &token).await?;
    Ok(token)
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn tokens_match(expected: Option<&str>, submitted: Option<&str>) -> bool {
    match (expected, submitted) {
        (Some(expected), Some(submitted)) if !expected.is_empty() => {
            expected.as_bytes().ct_eq(submitted.as_bytes()).into()
        }
        _ => false,
    }
}

/// Rejects non-safe requests whose form token does not match the session token (400).
/// A session store failure is reported as a 500.
///
/// The body is buffered to read the field and then handed on unchanged, so handlers can still
/// extract the full form.
pub async fn verify_csrf_token(
    session: Session,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    if request.method().is_safe() {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("unreadable request body: {e}")))?;

    let submitted = serde_urlencoded::from_bytes::<Submitted>(&bytes)
        .ok()
        .and_then(|form| form.csrf_token);
    // An unreachable session store is a server fault, not a bad token.
    let expected = session.get::<String>(CSRF_SESSION_KEY).await?;

    if !tokens_match(expected.as_deref(), submitted.as_deref()) {
        tracing::warn!(method = %parts.method, uri = %parts.uri, "CSRF token missing or mismatched");
        return Err(AppError::BadRequest("invalid CSRF token".to_string()));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_random_and_url_safe() {
        let a = generate_token();
        let b = generate_token();

        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn matching_requires_both_sides() {
        assert!(tokens_match(Some("abc"), Some("abc")));
        assert!(!tokens_match(Some("abc"), Some("abd")));
        assert!(!tokens_match(Some("abc"), Some("ab")));
        assert!(!tokens_match(Some("abc"), None));
        assert!(!tokens_match(None, Some("abc")));
        assert!(!tokens_match(Some(""), Some("")));
    }
}
