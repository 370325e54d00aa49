#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use scrumboard_ai::provider::FragmentStream;
use scrumboard_ai::{AiError, AiMediator, CompletionProvider, CompletionRequest};
use scrumboard_api::config::ServerConfig;
use scrumboard_api::router::build_app_router;
use scrumboard_api::state::AppState;
use scrumboard_core::board::store::BoardStore;

// ---------------------------------------------------------------------------
// Fake completion provider
// ---------------------------------------------------------------------------

/// Stands in for the LLM: answers every call with a fixed reply (or a fixed
/// upstream failure) and records the requests it received.
pub struct FakeProvider {
    reply: Result<String, u16>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeProvider {
    pub fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn answer(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(|status| AiError::Api {
            status,
            body: "upstream unavailable".into(),
        })
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.answer(request)
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<FragmentStream, AiError> {
        let text = self.answer(request)?;
        let mid = text
            .char_indices()
            .nth(text.chars().count() / 2)
            .map_or(text.len(), |(i, _)| i);
        let (head, tail) = text.split_at(mid);
        let fragments = vec![Ok(Some(head.to_string())), Ok(None), Ok(Some(tail.to_string()))];
        Ok(Box::pin(futures::stream::iter(fragments)))
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        boards_file: "boards_data.json".to_string(),
    }
}

/// A fully wired router plus the fakes behind it.
///
/// The board file lives in `boards_dir`, which is removed on drop.
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<FakeProvider>,
    pub boards: Arc<BoardStore>,
    pub boards_dir: TempDir,
}

impl TestApp {
    /// A fresh handle for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a provider that answers `"respuesta del modelo"`.
pub async fn build_test_app(pool: SqlitePool) -> TestApp {
    build_test_app_with(pool, FakeProvider::answering("respuesta del modelo"), false).await
}

/// Same as [`build_test_app`] with an explicit provider and reduction mode.
pub async fn build_test_app_with(
    pool: SqlitePool,
    provider: Arc<FakeProvider>,
    stream: bool,
) -> TestApp {
    let config = test_config();
    let boards_dir = tempfile::tempdir().unwrap();
    let boards = Arc::new(
        BoardStore::open(boards_dir.path().join("boards_data.json"))
            .await
            .unwrap(),
    );
    let mediator = AiMediator::new(provider.clone()).with_streaming(stream);

    let state = AppState {
        pool,
        mediator: Arc::new(mediator),
        boards: boards.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        provider,
        boards,
        boards_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Read the whole response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(&body.to_string())).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}
