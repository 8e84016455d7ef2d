//! [`TmdbClient`] against a local stand-in for the TMDB API.

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use reelview_core::{MovieSource, TmdbClient, TmdbConfig, Upstream, UpstreamError, UpstreamRequest};
use serde_json::json;

#[derive(Default)]
struct FakeTmdb {
    calls: AtomicUsize,
    last_query: Mutex<HashMap<String, String>>,
}

impl FakeTmdb {
    fn record(&self, query: HashMap<String, String>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = query;
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_query(&self) -> HashMap<String, String> {
        self.last_query.lock().unwrap().clone()
    }
}

async fn genres(
    State(fake): State<Arc<FakeTmdb>>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.record(query);
    Json(json!({"genres": [{"id": 28, "name": "Action"}]}))
}

async fn movie(
    State(fake): State<Arc<FakeTmdb>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.record(query);
    if id == "603" {
        (StatusCode::OK, Json(json!({"id": 603, "title": "The Matrix"})))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "status_code": 34,
                "status_message": "The resource you requested could not be found."
            })),
        )
    }
}

async fn discover(
    State(fake): State<Arc<FakeTmdb>>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.record(query);
    Json(json!({"page": 2, "results": [], "total_pages": 2, "total_results": 20}))
}

async fn start_fake() -> (Arc<FakeTmdb>, String) {
    let fake = Arc::new(FakeTmdb::default());
    let router = Router::new()
        .route("/3/genre/movie/list", get(genres))
        .route("/3/movie/{id}", get(movie))
        .route("/3/discover/movie", get(discover))
        .with_state(Arc::clone(&fake));
    let addr = common::serve(router).await;
    (fake, format!("http://{}/3", addr))
}

fn client(base_url: &str, cache_ttl_secs: u64) -> TmdbClient {
    TmdbClient::new(&TmdbConfig {
        api_key: "secret".to_string(),
        base_url: base_url.to_string(),
        cache_ttl_secs,
        ..TmdbConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_credentials_and_language_added() {
    let (fake, base_url) = start_fake().await;
    let client = client(&base_url, 0);

    let genres = client.list_genres().await.unwrap();
    assert_eq!(genres[0].name, "Action");

    let query = fake.last_query();
    assert_eq!(query.get("api_key").map(String::as_str), Some("secret"));
    assert_eq!(query.get("language").map(String::as_str), Some("en-US"));
}

#[tokio::test]
async fn test_discover_params() {
    let (fake, base_url) = start_fake().await;
    let client = client(&base_url, 0);

    client.discover_by_genre(28, Some(2)).await.unwrap();

    let query = fake.last_query();
    assert_eq!(query.get("with_genres").map(String::as_str), Some("28"));
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
}

#[tokio::test]
async fn test_fresh_response_is_reused() {
    let (fake, base_url) = start_fake().await;
    let client = client(&base_url, 3600);

    client.fetch(&UpstreamRequest::Genres).await.unwrap();
    client.fetch(&UpstreamRequest::Genres).await.unwrap();

    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn test_zero_ttl_disables_reuse() {
    let (fake, base_url) = start_fake().await;
    let client = client(&base_url, 0);

    client.fetch(&UpstreamRequest::Genres).await.unwrap();
    client.fetch(&UpstreamRequest::Genres).await.unwrap();

    assert_eq!(fake.calls(), 2);
}

#[tokio::test]
async fn test_not_found_is_not_cached() {
    let (fake, base_url) = start_fake().await;
    let client = client(&base_url, 3600);

    let response = client.fetch(&UpstreamRequest::movie("1")).await.unwrap();
    assert_eq!(response.status, 404);
    client.fetch(&UpstreamRequest::movie("1")).await.unwrap();
    assert_eq!(fake.calls(), 2);

    let err = client.get_movie("1").await.unwrap_err();
    assert!(matches!(err, UpstreamError::NotFound(_)));
}

#[tokio::test]
async fn test_get_movie() {
    let (_fake, base_url) = start_fake().await;
    let client = client(&base_url, 0);

    let movie = client.get_movie("603").await.unwrap();
    assert_eq!(movie.title, "The Matrix");
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    // Nothing listens on port 9 locally
    let client = client("http://127.0.0.1:9/3", 0);

    let err = client.fetch(&UpstreamRequest::Genres).await.unwrap_err();
    assert!(matches!(err, UpstreamError::HttpError(_)));
}
