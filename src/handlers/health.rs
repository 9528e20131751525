//! # Health Check Handler
//!
//! Liveness probe for load balancers and monitoring. It sits outside the session chain, so it
//! never touches the session store and answers the same way regardless of earlier requests.

/// GET /ping
pub async fn ping() -> &'static str {
    "OK"
}
