//! # Middleware Module
//!
//! Request/response interceptors, grouped by the chain they belong to.
//!
//! ## Standard chain (every request, outermost first)
//! - `recover`: turns a panic anywhere below into a generic 500
//! - `logging`: records method, URI, protocol and remote address
//! - `headers`: security headers on every response
//!
//! ## Dynamic chain (page routes, outermost first)
//! - `session`: loads and saves the cookie-bound session
//! - `csrf`: rejects state-changing requests without the session's token
//! - `auth::authenticate`: attaches the `CurrentUser` to the request
//!
//! The protected chain is the dynamic chain plus `auth::require_authentication`.

pub mod auth;
pub mod csrf;
pub mod headers;
pub mod logging;
pub mod recover;
pub mod session;
