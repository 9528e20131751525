//! # Request Logging
//!
//! Hooks for `tower_http::trace::TraceLayer`: one span per request, and an event as soon as the
//! request arrives. Response status and latency come from the layer's default callbacks.

use std::net::SocketAddr;

use axum::{body::Body, extract::ConnectInfo, http::Request};
use tracing::Span;

/// Span for one request, carrying the client address, protocol, method and URI.
///
/// The remote address is only known when the server was started with connect info; otherwise
/// (e.g. in tests) it is logged as "unknown".
pub fn request_span(request: &Request<Body>) -> Span {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "request",
        %ip,
        proto = ?request.version(),
        method = %request.method(),
        uri = %request.uri(),
    )
}

/// Emitted before dispatch, so every request is recorded whatever happens downstream.
pub fn log_request(_request: &Request<Body>, _span: &Span) {
    tracing::info!("received request");
}
