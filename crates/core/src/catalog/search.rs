//! Search results page.
//!
//! Every query change issues a fresh search. Requests are tagged with a
//! generation number and only the most recently issued one may update the
//! view, so a slow response for an old query never overwrites a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::Liveness;
use crate::upstream::{MovieSource, MovieSummary};

/// Shown when a search matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "movies", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// No query yet.
    Idle,
    NoResults,
    Results(Vec<MovieSummary>),
}

impl SearchOutcome {
    pub fn movies(&self) -> &[MovieSummary] {
        match self {
            Self::Results(movies) => movies,
            _ => &[],
        }
    }

    /// Informational message to render instead of a grid.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoResults => Some(NO_RESULTS_MESSAGE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub loading: bool,
    pub outcome: SearchOutcome,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            query: String::new(),
            loading: false,
            outcome: SearchOutcome::Idle,
        }
    }
}

pub struct SearchSession<S: ?Sized> {
    source: Arc<S>,
    generation: AtomicU64,
    view: RwLock<SearchView>,
    liveness: Liveness,
}

impl<S: MovieSource + ?Sized> SearchSession<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
            view: RwLock::new(SearchView::default()),
            liveness: Liveness::new(),
        }
    }

    pub async fn view(&self) -> SearchView {
        self.view.read().await.clone()
    }

    pub fn close(&self) {
        self.liveness.teardown();
    }

    /// Switch to `query` and search for it. Returns the view as it stands
    /// once this call is done, which may already reflect a newer query.
    pub async fn set_query(&self, query: &str) -> SearchView {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut view = self.view.write().await;
            view.query = query.to_string();
            if query.trim().is_empty() {
                view.loading = false;
                view.outcome = SearchOutcome::Idle;
                return view.clone();
            }
            view.loading = true;
        }

        let result = self.source.search_by_title(query).await;

        let mut view = self.view.write().await;
        if !self.liveness.is_alive() || self.generation.load(Ordering::SeqCst) != generation {
            debug!(query = %query, "Discarding superseded search response");
            return view.clone();
        }

        view.loading = false;
        view.outcome = match result {
            Ok(page) if !page.results.is_empty() => SearchOutcome::Results(page.results),
            Ok(_) => SearchOutcome::NoResults,
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed");
                SearchOutcome::NoResults
            }
        };
        view.clone()
    }
}
