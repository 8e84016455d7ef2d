//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Upstream (TMDB) requests and their latency
//! - The upstream freshness cache
//! - Landing page catalog loads

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Upstream Metrics
// =============================================================================

/// Upstream request duration.
pub static UPSTREAM_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelview_upstream_request_duration_seconds",
            "Duration of upstream metadata API calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

/// Upstream requests total.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelview_upstream_requests_total",
            "Total upstream metadata API requests",
        ),
        &["operation", "status"], // status: "success", "http_error", "transport_error"
    )
    .unwrap()
});

/// Freshness cache lookups.
pub static UPSTREAM_CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelview_upstream_cache_lookups_total",
            "Upstream response cache lookups",
        ),
        &["result"], // "hit", "miss"
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Genres whose first page could not be fetched during a catalog load.
pub static CATALOG_GENRE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelview_catalog_genre_failures_total",
            "Genre fetches that fell back to an empty list",
        ),
        &["phase"], // "initial", "load_more"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(UPSTREAM_REQUEST_DURATION.clone()),
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(UPSTREAM_CACHE_LOOKUPS.clone()),
        Box::new(CATALOG_GENRE_FAILURES.clone()),
    ]
}
