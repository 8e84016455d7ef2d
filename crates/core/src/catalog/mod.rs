//! Catalog views: the landing page, the movie detail page and search.
//!
//! Each view owns the state of one page visit. Views are torn down with
//! [`Liveness::teardown`]; requests still in flight at that point run to
//! completion but their results are discarded.

mod aggregator;
mod detail;
mod search;

pub use aggregator::{CatalogAggregator, CatalogState, LoadState};
pub use detail::{format_thousands, DetailComposer, MovieView};
pub use search::{SearchOutcome, SearchSession, SearchView, NO_RESULTS_MESSAGE};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors surfaced by the landing page aggregator.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A load-more for this genre is already running.
    #[error("Genre {0} is already loading more movies")]
    LoadInFlight(u32),

    /// The catalog was reloaded while the request was in flight.
    #[error("Catalog was reloaded; result for genre {0} discarded")]
    Reloaded(u32),

    /// The view was torn down.
    #[error("Catalog view is closed")]
    Closed,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Errors surfaced by the detail page.
#[derive(Debug, Error)]
pub enum DetailError {
    /// The movie could not be fetched; render the not-found page.
    #[error("Movie not found: {0}")]
    NotFound(String),
}

/// Shared flag telling in-flight work whether its view still exists.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Mark the view as gone. Irreversible.
    pub fn teardown(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
