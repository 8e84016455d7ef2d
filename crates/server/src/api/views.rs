//! Server-rendered page view models.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use reelview_core::{CatalogAggregator, CatalogState, DetailComposer, DetailError, MovieView};

use super::ErrorResponse;
use crate::state::AppState;

/// GET /api/views/home
///
/// Runs a fresh landing page load: the genre list plus the first page of
/// every genre.
pub async fn home(State(state): State<Arc<AppState>>) -> Json<CatalogState> {
    let aggregator = CatalogAggregator::new(state.upstream(), state.catalog_config().clone());
    Json(aggregator.load().await)
}

/// GET /api/views/movie/{id}
pub async fn movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieView>, impl IntoResponse> {
    let composer = DetailComposer::new(
        state.upstream(),
        state.catalog_config(),
        state.image_base_url(),
    );

    match composer.compose(&id).await {
        Ok(view) => Ok(Json(view)),
        Err(DetailError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Movie not found")),
        )),
    }
}
