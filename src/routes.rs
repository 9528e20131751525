//! # Routes
//!
//! Three classes of route:
//! - static: `/static/*` and `/ping`, no session
//! - dynamic: public pages, wrapped in the `dynamic` chain
//! - protected: the `dynamic` chain plus the authorization gate
//!
//! Chains are `ServiceBuilder` stacks; the first layer added runs first on the way in and last
//! on the way out. Each chain is attached with `MethodRouter::route_layer`, so a request for a
//! known path with an unregistered method gets a plain `405 Method Not Allowed` from the router
//! without entering the chain. Unknown paths fall through to a 404.
//!
//! The whole router is then wrapped in the `standard` chain: panic recovery, request logging,
//! security headers.

use std::path::Path;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::handlers::{auth, health, not_found, pages, snippets, users};
use crate::middleware::{auth as authn, csrf, headers, logging, recover};
use crate::state::AppState;

/// Builds the complete application router.
pub fn routes<Store>(
    state: AppState,
    session_layer: SessionManagerLayer<Store>,
    static_dir: &Path,
) -> Router
where
    Store: SessionStore + Clone,
{
    let dynamic = ServiceBuilder::new()
        .layer(session_layer)
        .layer(middleware::from_fn(csrf::verify_csrf_token))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authn::authenticate,
        ));

    let protected = dynamic
        .clone()
        .layer(middleware::from_fn(authn::require_authentication));

    let router = Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/ping", get(health::ping))
        // Public
        .route("/", get(pages::home).route_layer(dynamic.clone()))
        .route("/about", get(pages::about).route_layer(dynamic.clone()))
        .route(
            "/snippet/view/{id}",
            get(snippets::view).route_layer(dynamic.clone()),
        )
        .route(
            "/user/signup",
            get(auth::signup)
                .post(auth::signup_post)
                .route_layer(dynamic.clone()),
        )
        .route(
            "/user/login",
            get(auth::login)
                .post(auth::login_post)
                .route_layer(dynamic),
        )
        // Protected
        .route(
            "/snippet/create",
            get(snippets::create)
                .post(snippets::create_post)
                .route_layer(protected.clone()),
        )
        .route(
            "/account/view",
            get(users::account_view).route_layer(protected.clone()),
        )
        .route(
            "/account/password/update",
            get(users::password_update)
                .post(users::password_update_post)
                .route_layer(protected.clone()),
        )
        .route(
            "/user/logout",
            post(auth::logout_post).route_layer(protected),
        )
        .fallback(not_found)
        .with_state(state);

    standard(router)
}

/// Wraps `router` in the chain every request passes through, outermost first: panic recovery,
/// request logging, common headers.
pub fn standard(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(recover::recover_panic))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(logging::request_span)
                    .on_request(logging::log_request),
            )
            .layer(middleware::from_fn(headers::common_headers)),
    )
}
