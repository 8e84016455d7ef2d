//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access; it is appended to every request and
//! never leaves this process. Rate limits are generous (around 40 requests
//! per second), so no client-side limiting is done.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::cache::ResponseCache;
use super::{Upstream, UpstreamError, UpstreamRequest, UpstreamResponse};
use crate::config::TmdbConfig;
use crate::metrics::{UPSTREAM_CACHE_LOOKUPS, UPSTREAM_REQUESTS, UPSTREAM_REQUEST_DURATION};

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
    cache: ResponseCache,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: &TmdbConfig) -> Result<Self, UpstreamError> {
        if config.api_key.trim().is_empty() {
            return Err(UpstreamError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            cache: ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)),
        })
    }

    /// Freshness window applied to responses.
    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Full URL for a request, without credentials.
    fn url(&self, request: &UpstreamRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

#[async_trait]
impl Upstream for TmdbClient {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let operation = request.operation();

        if let Some(cached) = self.cache.get(request).await {
            UPSTREAM_CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
            debug!(operation, request = %request, "TMDB cache hit");
            return Ok(cached);
        }
        if self.cache.is_enabled() {
            UPSTREAM_CACHE_LOOKUPS.with_label_values(&["miss"]).inc();
        }

        debug!(operation, request = %request, "TMDB request");
        let start = Instant::now();

        let result = self
            .client
            .get(self.url(request))
            .query(&[("api_key", &self.api_key), ("language", &self.language)])
            .query(&request.params())
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                UPSTREAM_REQUESTS
                    .with_label_values(&[operation, "transport_error"])
                    .inc();
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        UPSTREAM_REQUEST_DURATION
            .with_label_values(&[operation])
            .observe(start.elapsed().as_secs_f64());

        let upstream = UpstreamResponse {
            status,
            content_type,
            body,
        };

        if upstream.is_success() {
            UPSTREAM_REQUESTS
                .with_label_values(&[operation, "success"])
                .inc();
            self.cache.insert(request.clone(), upstream.clone()).await;
        } else {
            UPSTREAM_REQUESTS
                .with_label_values(&[operation, "http_error"])
                .inc();
            debug!(operation, status, "TMDB returned non-success status");
        }

        Ok(upstream)
    }
}
