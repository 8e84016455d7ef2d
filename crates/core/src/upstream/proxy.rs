//! Client for the same-origin proxy facade.
//!
//! This is how a browser-side view reaches the upstream: through the
//! `/api/tmdb/*` routes, without ever holding the API key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Upstream, UpstreamError, UpstreamRequest, UpstreamResponse};

/// Body the facade sends with a 502 when it could not reach the upstream.
#[derive(Debug, Deserialize)]
struct GatewayError {
    error: String,
}

/// The facade's transport-failure reply, if this is one.
///
/// A relayed upstream 502 carries the upstream's own body and is left as a
/// response.
fn gateway_failure(response: &UpstreamResponse) -> Option<String> {
    if response.status != 502 {
        return None;
    }
    serde_json::from_slice::<GatewayError>(&response.body)
        .ok()
        .map(|e| e.error)
}

/// Upstream transport that goes through the proxy facade.
pub struct ProxyClient {
    client: Client,
    origin: String,
}

impl ProxyClient {
    /// Create a client for the facade served at `origin` (e.g. `http://localhost:3000`).
    pub fn new(origin: impl Into<String>) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
        })
    }

    /// Facade path and query parameters for a request.
    fn route(request: &UpstreamRequest) -> Result<(String, Vec<(&'static str, String)>), UpstreamError> {
        match request {
            UpstreamRequest::Genres => Ok(("/api/tmdb/genres".to_string(), vec![])),
            UpstreamRequest::Movie { id } => Ok((
                format!("/api/tmdb/movie/{}", urlencoding::encode(id)),
                vec![],
            )),
            UpstreamRequest::Discover { genre_id, page } => Ok((
                "/api/tmdb/movies".to_string(),
                vec![("genreId", genre_id.clone()), ("page", page.clone())],
            )),
            UpstreamRequest::Search { query } => Ok((
                "/api/tmdb/search".to_string(),
                vec![("query", query.clone())],
            )),
            UpstreamRequest::Similar { .. } => Err(UpstreamError::Unsupported(
                "similar movies are only fetched server-side",
            )),
        }
    }
}

#[async_trait]
impl Upstream for ProxyClient {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let (path, params) = Self::route(request)?;

        debug!(operation = request.operation(), path = %path, "Proxy request");

        let response = self
            .client
            .get(format!("{}{}", self.origin, path))
            .query(&params)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        let response = UpstreamResponse {
            status,
            content_type,
            body,
        };

        if let Some(message) = gateway_failure(&response) {
            return Err(UpstreamError::Unavailable(message));
        }
        Ok(response)
    }
}
