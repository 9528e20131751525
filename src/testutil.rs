//! Router test harness: the full route table over in-memory stores, driven with `oneshot`.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, StatusCode},
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use tower_sessions::{
    session::{Id, Record},
    session_store, MemoryStore, SessionStore,
};

use crate::db::mock::{MockSnippets, MockUsers};
use crate::middleware::{
    csrf::CSRF_FIELD,
    session::{session_layer, SESSION_COOKIE},
};
use crate::routes::routes;
use crate::state::AppState;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Sends requests to the router, carrying the session cookie between them like a browser.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    /// The current `name=value` cookie pair, if any.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Presents `id` as the session cookie on subsequent requests.
    pub fn set_session_id(&mut self, id: Id) {
        self.cookie = Some(format!("{SESSION_COOKIE}={id}"));
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn request(&mut self, method: Method, path: &str) -> TestResponse {
        self.send(method, path, None).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).expect("encode form");
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send(&mut self, method: Method, path: &str, form: Option<String>) -> TestResponse {
        let mut builder = axum::http::Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(pair) = set_cookie.split(';').next() {
                self.cookie = Some(pair.trim().to_string());
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Pulls the hidden CSRF field's value out of a rendered form.
pub fn extract_csrf_token(body: &str) -> String {
    let marker = format!(r#"name="{CSRF_FIELD}" value=""#);
    let start = body.find(&marker).expect("csrf field in page") + marker.len();
    let len = body[start..].find('"').expect("closing quote");
    body[start..start + len].to_string()
}

/// The application over mock stores, with handles on the mocks for side-effect assertions.
pub struct TestApp {
    pub client: TestClient,
    pub snippets: Arc<MockSnippets>,
    pub users: Arc<MockUsers>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_session_store(MemoryStore::default())
    }

    pub fn with_session_store<Store>(store: Store) -> Self
    where
        Store: SessionStore + Clone,
    {
        let snippets = Arc::new(MockSnippets::default());
        let users = Arc::new(MockUsers::default());
        let state = AppState::with_stores(snippets.clone(), users.clone());
        let router = routes(state, session_layer(store, false), Path::new("ui/static"));

        Self {
            client: TestClient::new(router),
            snippets,
            users,
        }
    }

    /// Loads the login form and returns the session's CSRF token.
    pub async fn csrf_token(&mut self) -> String {
        let response = self.client.get("/user/login").await;
        extract_csrf_token(&response.body)
    }

    /// Logs in as the mock user alice@example.com.
    pub async fn log_in(&mut self) -> TestResponse {
        let token = self.csrf_token().await;
        let response = self
            .client
            .post_form(
                "/user/login",
                &[
                    ("email", "alice@example.com"),
                    ("password", "pa$$word"),
                    (CSRF_FIELD, token.as_str()),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
        response
    }
}

/// A session backend that is down: every operation fails.
#[derive(Debug, Clone, Default)]
pub struct UnavailableStore;

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn save(&self, _record: &Record) -> session_store::Result<()> {
        Err(session_store::Error::Backend("store unavailable".to_string()))
    }

    async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
        Err(session_store::Error::Backend("store unavailable".to_string()))
    }

    async fn delete(&self, _id: &Id) -> session_store::Result<()> {
        Err(session_store::Error::Backend("store unavailable".to_string()))
    }
}
