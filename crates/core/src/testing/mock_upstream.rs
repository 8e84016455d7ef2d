//! Mock upstream for testing.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, Semaphore};

use crate::upstream::{
    Genre, GenreList, MovieDetail, MoviePage, MovieSummary, Upstream, UpstreamError,
    UpstreamRequest, UpstreamResponse,
};

/// Body TMDB returns for unknown resources.
const NOT_FOUND_BODY: &str = r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#;

/// Mock implementation of the Upstream trait.
///
/// Provides controllable behavior for testing:
/// - Return canned responses per request
/// - Track requests for assertions
/// - Simulate transport failures
/// - Hold requests in flight until released, to control completion order
///
/// Requests with no canned response get TMDB's 404 not-found body.
///
/// # Example
///
/// ```rust,ignore
/// use reelview_core::testing::{MockUpstream, fixtures};
///
/// let upstream = MockUpstream::new();
/// upstream.set_genres(&[fixtures::genre(28, "Action")]).await;
/// upstream.set_discover_page(28, 1, fixtures::movies(100, 20)).await;
///
/// let genres = upstream.list_genres().await?;
/// assert_eq!(genres.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockUpstream {
    responses: Arc<RwLock<HashMap<UpstreamRequest, UpstreamResponse>>>,
    failures: Arc<RwLock<HashSet<UpstreamRequest>>>,
    gates: Arc<RwLock<HashMap<UpstreamRequest, Arc<Semaphore>>>>,
    requests: Arc<RwLock<Vec<UpstreamRequest>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockUpstream {
    /// Create a new mock with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Answer `request` with `response`.
    pub async fn respond(&self, request: UpstreamRequest, response: UpstreamResponse) {
        self.failures.write().await.remove(&request);
        self.responses.write().await.insert(request, response);
    }

    /// Answer `request` with `body` serialized as a 200 JSON response.
    pub async fn respond_json<T: Serialize>(&self, request: UpstreamRequest, body: &T) {
        let json = serde_json::to_string(body).unwrap_or_default();
        self.respond(request, UpstreamResponse::json(200, json)).await;
    }

    /// Make `request` fail at the transport level.
    pub async fn fail(&self, request: UpstreamRequest) {
        self.failures.write().await.insert(request);
    }

    pub async fn set_genres(&self, genres: &[Genre]) {
        let body = GenreList {
            genres: genres.to_vec(),
        };
        self.respond_json(UpstreamRequest::Genres, &body).await;
    }

    pub async fn set_discover_page(&self, genre_id: u32, page: u32, movies: Vec<MovieSummary>) {
        let body = MoviePage {
            page,
            total_results: movies.len() as u32,
            results: movies,
            total_pages: 500,
        };
        self.respond_json(UpstreamRequest::discover(genre_id, Some(page)), &body)
            .await;
    }

    pub async fn set_movie(&self, movie: MovieDetail) {
        self.respond_json(UpstreamRequest::movie(movie.id.to_string()), &movie)
            .await;
    }

    pub async fn set_search(&self, query: &str, movies: Vec<MovieSummary>) {
        let body = MoviePage {
            page: 1,
            total_results: movies.len() as u32,
            results: movies,
            total_pages: 1,
        };
        self.respond_json(UpstreamRequest::search(query), &body).await;
    }

    pub async fn set_similar(&self, id: u32, movies: Vec<MovieSummary>) {
        let body = MoviePage {
            page: 1,
            total_results: movies.len() as u32,
            results: movies,
            total_pages: 1,
        };
        self.respond_json(UpstreamRequest::similar(id.to_string()), &body)
            .await;
    }

    // =========================================================================
    // Completion control
    // =========================================================================

    /// Keep matching requests in flight until [`release`](Self::release).
    pub async fn hold(&self, request: UpstreamRequest) {
        self.gates
            .write()
            .await
            .insert(request, Arc::new(Semaphore::new(0)));
    }

    /// Let held requests complete.
    pub async fn release(&self, request: &UpstreamRequest) {
        if let Some(gate) = self.gates.write().await.remove(request) {
            gate.close();
        }
    }

    /// Requests currently being served.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of requests that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Wait until at least `count` requests are in flight. Returns false on timeout.
    pub async fn wait_for_in_flight(&self, count: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            while self.in_flight() < count {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .is_ok()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// All requests received, in arrival order.
    pub async fn requests(&self) -> Vec<UpstreamRequest> {
        self.requests.read().await.clone()
    }

    /// How many times `request` was received.
    pub async fn request_count(&self, request: &UpstreamRequest) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| *r == request)
            .count()
    }

    pub async fn clear_requests(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.requests.write().await.push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let gate = self.gates.read().await.get(request).cloned();
        if let Some(gate) = gate {
            // Closed on release; the acquire error is the wake-up.
            let _ = gate.acquire().await;
        }

        let failed = self.failures.read().await.contains(request);
        let response = self.responses.read().await.get(request).cloned();

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if failed {
            return Err(UpstreamError::Unavailable(format!(
                "mock failure for {}",
                request
            )));
        }

        Ok(response.unwrap_or_else(|| UpstreamResponse::json(404, NOT_FOUND_BODY)))
    }
}
