#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Tests drive the real router, handlers and templates. Only the store is
//! replaced: [`FakeGateway`] records every statement it is asked to run and
//! replays scripted results in order.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;

use chemdb_server::AppState;
use chemdb_server::routes;
use chemdb_server::store::{Gateway, Row, Statement, StoreError};
use chemdb_server::theme::ThemeEngine;

/// Store stand-in that replays queued results.
///
/// Each call to `execute`/`execute_one` consumes the next queued result.
/// Once the queue is empty every statement yields no rows.
#[derive(Default)]
pub struct FakeGateway {
    results: Mutex<VecDeque<Result<Vec<Row>, StoreError>>>,
    statements: Mutex<Vec<Statement>>,
    unreachable: Mutex<bool>,
}

impl FakeGateway {
    /// Queue rows for the next statement.
    pub fn push_rows(&self, rows: Vec<Row>) {
        self.results.lock().push_back(Ok(rows));
    }

    /// Queue a failure for the next statement.
    pub fn push_failure(&self) {
        self.results
            .lock()
            .push_back(Err(StoreError::Timeout(Duration::from_secs(30))));
    }

    /// Make `ping` report the store as down.
    pub fn set_unreachable(&self) {
        *self.unreachable.lock() = true;
    }

    /// Every statement executed so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().clone()
    }

    fn next(&self, statement: &Statement) -> Result<Vec<Row>, StoreError> {
        self.statements.lock().push(statement.clone());
        self.results.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Row>, StoreError> {
        self.next(statement)
    }

    async fn execute_one(&self, statement: &Statement) -> Result<Option<Row>, StoreError> {
        Ok(self.next(statement)?.into_iter().next())
    }

    async fn ping(&self) -> bool {
        !*self.unreachable.lock()
    }
}

/// Test application wrapper using the real routes and templates.
pub struct TestApp {
    router: Router,
    pub gateway: Arc<FakeGateway>,
}

impl TestApp {
    pub fn new() -> Self {
        let templates_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent() // crates/
            .and_then(|p| p.parent()) // project root
            .unwrap_or(Path::new("."))
            .join("templates");

        let theme = ThemeEngine::new(&templates_dir).expect("Failed to load templates");
        let gateway = Arc::new(FakeGateway::default());
        let state = AppState::from_parts(gateway.clone(), theme);

        Self {
            router: routes::app(state, Duration::from_secs(60)),
            gateway,
        }
    }

    /// Make a GET request.
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request and return status plus body text.
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let response = self.get(uri).await;
        let status = response.status();
        (status, body_string(response).await)
    }

    /// Make a GET request and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get_text(uri).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {body}"));
        (status, json)
    }
}

/// Extract response body as string.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
