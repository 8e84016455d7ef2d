use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, tmdb, views};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Upstream passthrough
        .route("/tmdb/genres", get(tmdb::genres))
        .route("/tmdb/movie/{id}", get(tmdb::movie))
        .route("/tmdb/movies", get(tmdb::movies))
        .route("/tmdb/search", get(tmdb::search))
        // Page view models
        .route("/views/home", get(views::home))
        .route("/views/movie/{id}", get(views::movie))
        .with_state(Arc::clone(&state));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics));

    // Serve the front end with SPA fallback
    if let Some(static_dir) = state.static_dir() {
        let index_path = static_dir.join("index.html");
        let serve_dir = ServeDir::new(static_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
    }

    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
