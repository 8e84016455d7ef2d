//! Upstream metadata API integration.
//!
//! [`Upstream`] is the raw transport: it issues one [`UpstreamRequest`] and
//! hands back the upstream status and body untouched, which is what the
//! proxy relays. [`MovieSource`] layers the typed operations the views need
//! on top of any `Upstream`.

mod cache;
mod proxy;
mod request;
mod tmdb;
mod types;

pub use cache::ResponseCache;
pub use proxy::ProxyClient;
pub use request::{UpstreamRequest, DEFAULT_PAGE};
pub use tmdb::TmdbClient;
pub use types::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed before a status was received.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Upstream could not be reached, as reported by a relay in between
    /// (the facade's 502 reply seen by `ProxyClient`, or a test double).
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// Resource not found (404 or the status_code 34 sentinel).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),

    /// A required request parameter was empty.
    #[error("Missing {0}")]
    MissingParameter(&'static str),

    /// The transport cannot serve this operation.
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),
}

/// Raw upstream reply: status, content type and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// A JSON response, mostly for tests and mocks.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.into().into_bytes(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, UpstreamError> {
        serde_json::from_slice(&self.body).map_err(|e| UpstreamError::ParseError(e.to_string()))
    }

    /// TMDB error envelope, if the body carries one.
    pub(crate) fn status_envelope(&self) -> StatusEnvelope {
        serde_json::from_slice(&self.body).unwrap_or_default()
    }

    /// Decode a successful body, mapping failure statuses to errors.
    fn decode<T: DeserializeOwned>(&self, request: &UpstreamRequest) -> Result<T, UpstreamError> {
        if self.status == 404 {
            return Err(UpstreamError::NotFound(request.to_string()));
        }
        if !self.is_success() {
            let envelope = self.status_envelope();
            return Err(UpstreamError::ApiError {
                status: self.status,
                message: envelope.status_message.unwrap_or_else(|| self.text()),
            });
        }
        self.parse()
    }
}

/// Raw transport to the upstream API (or to something relaying it).
///
/// Implementations return `Err` only when no upstream status was obtained;
/// 4xx/5xx replies come back as `Ok` responses.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// Typed read operations used by the catalog views.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// All movie genres, in upstream order.
    async fn list_genres(&self) -> Result<Vec<Genre>, UpstreamError>;

    /// Full record for one movie. Unknown ids are `NotFound`, whether the
    /// upstream says so with a 404 or with the status_code 34 sentinel.
    async fn get_movie(&self, id: &str) -> Result<MovieDetail, UpstreamError>;

    /// One page of movies in a genre (`page` defaults to 1).
    async fn discover_by_genre(
        &self,
        genre_id: u32,
        page: Option<u32>,
    ) -> Result<MoviePage, UpstreamError>;

    /// Title search. An empty query is rejected without a request.
    async fn search_by_title(&self, query: &str) -> Result<MoviePage, UpstreamError>;

    /// Movies similar to `id`.
    async fn fetch_similar(&self, id: &str) -> Result<Vec<MovieSummary>, UpstreamError>;

    /// Like [`fetch_similar`](Self::fetch_similar), but any failure yields an
    /// empty list so the detail page still renders.
    async fn get_similar(&self, id: &str) -> Vec<MovieSummary> {
        match self.fetch_similar(id).await {
            Ok(movies) => movies,
            Err(e) => {
                warn!(movie_id = %id, error = %e, "Similar movies unavailable");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<U: Upstream + ?Sized> MovieSource for U {
    async fn list_genres(&self) -> Result<Vec<Genre>, UpstreamError> {
        let request = UpstreamRequest::Genres;
        let list: GenreList = self.fetch(&request).await?.decode(&request)?;
        Ok(list.genres)
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetail, UpstreamError> {
        let request = UpstreamRequest::movie(id);
        let response = self.fetch(&request).await?;

        if response.status_envelope().status_code == Some(STATUS_CODE_NOT_FOUND) {
            return Err(UpstreamError::NotFound(format!("Movie ID {}", id)));
        }

        let movie: MovieDetail = response.decode(&request)?;
        if movie.status_code == Some(STATUS_CODE_NOT_FOUND) {
            return Err(UpstreamError::NotFound(format!("Movie ID {}", id)));
        }
        Ok(movie)
    }

    async fn discover_by_genre(
        &self,
        genre_id: u32,
        page: Option<u32>,
    ) -> Result<MoviePage, UpstreamError> {
        let request = UpstreamRequest::discover(genre_id, page);
        self.fetch(&request).await?.decode(&request)
    }

    async fn search_by_title(&self, query: &str) -> Result<MoviePage, UpstreamError> {
        if query.is_empty() {
            return Err(UpstreamError::MissingParameter("query"));
        }
        let request = UpstreamRequest::search(query);
        self.fetch(&request).await?.decode(&request)
    }

    async fn fetch_similar(&self, id: &str) -> Result<Vec<MovieSummary>, UpstreamError> {
        let request = UpstreamRequest::similar(id);
        let page: MoviePage = self.fetch(&request).await?.decode(&request)?;
        Ok(page.results)
    }
}
