//! # Session Configuration
//!
//! Builds the `tower_sessions` layer that opens the dynamic chain. The store is generic: SQLite
//! in production, `MemoryStore` in tests.

use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

pub const SESSION_COOKIE: &str = "session";

/// Session layer for the dynamic chain.
///
/// Sessions expire after 12 hours without a request. An unknown, expired or undecodable cookie
/// simply yields a fresh empty session.
pub fn session_layer<Store>(store: Store, secure: bool) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(secure)
        .with_expiry(Expiry::OnInactivity(Duration::hours(12)))
}
