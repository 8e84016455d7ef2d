//! Common test utilities for in-process server testing.
//!
//! This module provides a test fixture that builds the router around a
//! [`MockUpstream`], so the facade and view endpoints can be exercised
//! without reaching TMDB.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use reelview_core::testing::MockUpstream;
use reelview_core::{Config, TmdbConfig, Upstream};

/// Re-export fixtures for test convenience
pub use reelview_core::testing::fixtures;

/// Test fixture wrapping the full router.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_genres() {
///     let fixture = TestFixture::new();
///     fixture.upstream.set_genres(&[fixtures::genre(28, "Action")]).await;
///
///     let response = fixture.get("/api/tmdb/genres").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock upstream - configure TMDB responses
    pub upstream: Arc<MockUpstream>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Config used by every fixture.
pub fn test_config() -> Config {
    Config {
        tmdb: TmdbConfig {
            api_key: "test-key".to_string(),
            ..TmdbConfig::default()
        },
        ..Config::default()
    }
}

impl TestFixture {
    /// Create a new test fixture with an empty mock upstream.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let upstream = Arc::new(MockUpstream::new());
        let state = Arc::new(reelview_server::state::AppState::new(
            config,
            Arc::clone(&upstream) as Arc<dyn Upstream>,
        ));
        let router = reelview_server::api::create_router(state);

        Self { router, upstream }
    }

    /// Serve the router on an ephemeral local port.
    pub async fn serve(&self) -> SocketAddr {
        serve(self.router.clone()).await
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Serve any router on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
