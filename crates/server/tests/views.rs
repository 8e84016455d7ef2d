//! Tests for the page view model endpoints and for views driven through
//! the facade by [`ProxyClient`].

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use reelview_core::{
    CatalogAggregator, CatalogConfig, MovieSource, ProxyClient, SearchOutcome, SearchSession,
    Upstream, UpstreamError, UpstreamRequest, UpstreamResponse,
};
use serde_json::json;

use common::{fixtures, TestFixture};

#[tokio::test]
async fn test_home_view_truncates_each_genre() {
    let fixture = TestFixture::new();
    fixture
        .upstream
        .set_genres(&[fixtures::genre(28, "Action"), fixtures::genre(35, "Comedy")])
        .await;
    fixture
        .upstream
        .set_discover_page(28, 1, fixtures::movies(100, 20))
        .await;
    fixture.upstream.fail(UpstreamRequest::discover(35, None)).await;

    let response = fixture.get("/api/views/home").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["genres"].as_array().unwrap().len(), 2);
    assert_eq!(
        response.body["movies_by_genre"]["28"].as_array().unwrap().len(),
        8
    );
    assert_eq!(response.body["movies_by_genre"]["35"], json!([]));
    assert_eq!(response.body["page_by_genre"]["28"], 1);
}

#[tokio::test]
async fn test_movie_view_caps_similar() {
    let fixture = TestFixture::new();
    fixture
        .upstream
        .set_movie(fixtures::movie_detail(603, "The Matrix"))
        .await;
    fixture
        .upstream
        .set_similar(603, fixtures::movies(1000, 20))
        .await;

    let response = fixture.get("/api/views/movie/603").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["movie"]["title"], "The Matrix");
    assert_eq!(response.body["similar"].as_array().unwrap().len(), 8);
    assert_eq!(response.body["budget"], "$63,000,000");
    assert_eq!(
        response.body["poster_url"],
        "https://image.tmdb.org/t/p/w500/poster-603.jpg"
    );
}

#[tokio::test]
async fn test_movie_view_sentinel_is_not_found() {
    let fixture = TestFixture::new();
    fixture
        .upstream
        .respond(
            UpstreamRequest::movie("424242"),
            UpstreamResponse::json(200, r#"{"success":false,"status_code":34}"#),
        )
        .await;

    let response = fixture.get("/api/views/movie/424242").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"error": "Movie not found"}));
}

#[tokio::test]
async fn test_catalog_through_facade() {
    let fixture = TestFixture::new();
    fixture
        .upstream
        .set_genres(&[fixtures::genre(28, "Action"), fixtures::genre(35, "Comedy")])
        .await;
    fixture
        .upstream
        .set_discover_page(28, 1, fixtures::movies(100, 20))
        .await;
    fixture
        .upstream
        .set_discover_page(28, 2, fixtures::movies(120, 20))
        .await;
    fixture
        .upstream
        .set_discover_page(35, 1, fixtures::movies(200, 3))
        .await;

    let addr = fixture.serve().await;
    let client = Arc::new(ProxyClient::new(format!("http://{}", addr)).unwrap());
    let catalog = CatalogAggregator::new(client, CatalogConfig::default());

    let state = catalog.load().await;
    assert_eq!(state.movies(28).len(), 8);
    assert_eq!(state.movies(35).len(), 3);

    let appended = catalog.load_more(28).await.unwrap();
    assert_eq!(appended, 20);

    let state = catalog.snapshot().await;
    assert_eq!(state.movies(28).len(), 28);
    assert_eq!(state.page(28), 2);
    assert_eq!(state.movies(28)[8].id, 120);
}

#[tokio::test]
async fn test_search_through_facade() {
    let fixture = TestFixture::new();
    fixture
        .upstream
        .set_search("matrix", vec![fixtures::movie(603, "The Matrix")])
        .await;

    let addr = fixture.serve().await;
    let client = Arc::new(ProxyClient::new(format!("http://{}", addr)).unwrap());
    let session = SearchSession::new(client);

    let view = session.set_query("matrix").await;
    assert_eq!(view.outcome.movies()[0].id, 603);

    let view = session.set_query("nothing here").await;
    assert_eq!(view.outcome, SearchOutcome::NoResults);
}

#[tokio::test]
async fn test_proxy_movie_not_found() {
    let fixture = TestFixture::new();
    let addr = fixture.serve().await;
    let client = ProxyClient::new(format!("http://{}", addr)).unwrap();

    let err = client.get_movie("999999").await.unwrap_err();
    assert!(matches!(err, UpstreamError::NotFound(_)));

    // Similar movies are not exposed through the facade
    assert!(client.get_similar("603").await.is_empty());
}

#[tokio::test]
async fn test_proxy_reports_facade_transport_failure() {
    let fixture = TestFixture::new();
    fixture.upstream.fail(UpstreamRequest::Genres).await;
    let addr = fixture.serve().await;
    let client = ProxyClient::new(format!("http://{}", addr)).unwrap();

    let err = client.fetch(&UpstreamRequest::Genres).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Unavailable(_)));

    // Upstream statuses still come back as responses
    let response = client.fetch(&UpstreamRequest::movie("1")).await.unwrap();
    assert_eq!(response.status, 404);
}
