//! # Panic Recovery
//!
//! Outermost layer of the standard chain. A panic in any handler or middleware becomes a
//! generic 500; the process keeps serving other requests.

use std::any::Any;
use std::backtrace::Backtrace;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::middleware::headers::apply_common_headers;

/// Response for a request whose processing panicked.
///
/// The client gets a bare 500 and `Connection: close`; the panic message is only logged.
/// Security headers are re-applied because the panic unwound past the header middleware.
pub fn recover_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "recovered from panic while handling request");

    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::INTERNAL_SERVER_ERROR
            .canonical_reason()
            .unwrap_or_default(),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    apply_common_headers(response.headers_mut());
    response
}

/// Routes panic reports through tracing, with the location and a backtrace of the panicking
/// thread. `recover_panic` only sees the payload, so this is where the stack is captured.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let backtrace = Backtrace::force_capture();
        tracing::error!(%location, %backtrace, "panic: {info}");
    }));
}
