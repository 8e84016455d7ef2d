//! Passthrough handlers for the upstream movie API.
//!
//! Each handler forwards the request parameters, then relays the upstream
//! status code and body unmodified with a `Cache-Control` hint. The only
//! validation is the required-parameter check.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reelview_core::upstream::DEFAULT_PAGE;
use reelview_core::{UpstreamRequest, UpstreamResponse};
use serde::Deserialize;
use tracing::{debug, warn};

use super::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MoviesParams {
    #[serde(rename = "genreId")]
    pub genre_id: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// GET /api/tmdb/genres
pub async fn genres(State(state): State<Arc<AppState>>) -> Response {
    forward(&state, UpstreamRequest::Genres).await
}

/// GET /api/tmdb/movie/{id}
///
/// The id is forwarded as-is; the upstream decides whether it exists.
pub async fn movie(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    forward(&state, UpstreamRequest::movie(id)).await
}

/// GET /api/tmdb/movies?genreId=..&page=..
pub async fn movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesParams>,
) -> Response {
    let Some(genre_id) = non_empty(params.genre_id) else {
        return missing("genreId");
    };
    let page = non_empty(params.page).unwrap_or_else(|| DEFAULT_PAGE.to_string());

    forward(&state, UpstreamRequest::Discover { genre_id, page }).await
}

/// GET /api/tmdb/search?query=..
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = non_empty(params.query) else {
        return missing("query");
    };

    forward(&state, UpstreamRequest::search(query)).await
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn missing(param: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(format!("Missing {}", param))),
    )
        .into_response()
}

async fn forward(state: &AppState, request: UpstreamRequest) -> Response {
    debug!(request = %request, "Relaying upstream request");

    match state.upstream().fetch(&request).await {
        Ok(response) => relay(response, state.cache_ttl().as_secs()),
        Err(e) => {
            warn!(request = %request, error = %e, "Upstream request failed");
            (StatusCode::BAD_GATEWAY, Json(ErrorResponse::new(e.to_string()))).into_response()
        }
    }
}

/// Turn an upstream reply into a response with the same status, body and
/// content type.
fn relay(upstream: UpstreamResponse, max_age: u64) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let mut response = (status, upstream.body).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    if let Ok(cache_control) = HeaderValue::from_str(&format!("public, max-age={}", max_age)) {
        headers.insert(header::CACHE_CONTROL, cache_control);
    }
    response
}
