//! Landing page: movies grouped by genre, with per-genre "load more".

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{CatalogError, Liveness};
use crate::config::CatalogConfig;
use crate::metrics::CATALOG_GENRE_FAILURES;
use crate::upstream::{Genre, MovieSource, MovieSummary};

/// Overall page state. Load-more runs per genre and does not change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
}

/// Everything the landing page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogState {
    /// Genres in upstream order.
    pub genres: Vec<Genre>,
    /// Movies per genre, in upstream ranking order. Pages are appended as
    /// returned; nothing is deduplicated.
    pub movies_by_genre: BTreeMap<u32, Vec<MovieSummary>>,
    /// Last page fetched per genre.
    pub page_by_genre: BTreeMap<u32, u32>,
    /// Genres with a load-more in flight.
    pub loading_more: BTreeSet<u32>,
}

impl CatalogState {
    /// Movies shown for a genre; empty when none could be fetched.
    pub fn movies(&self, genre_id: u32) -> &[MovieSummary] {
        self.movies_by_genre
            .get(&genre_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current page of a genre. Genres never loaded count as page 1.
    pub fn page(&self, genre_id: u32) -> u32 {
        self.page_by_genre.get(&genre_id).copied().unwrap_or(1)
    }

    pub fn is_loading_more(&self, genre_id: u32) -> bool {
        self.loading_more.contains(&genre_id)
    }
}

/// Builds and grows the landing page catalog.
///
/// One aggregator serves one page visit. [`load`](Self::load) rebuilds the
/// whole state; [`load_more`](Self::load_more) appends one page to a genre.
pub struct CatalogAggregator<S: ?Sized> {
    source: Arc<S>,
    config: CatalogConfig,
    load_state: RwLock<LoadState>,
    state: RwLock<CatalogState>,
    /// Bumped whenever a full load installs its state, so load-more results
    /// computed against the previous state can be told apart.
    epoch: AtomicU64,
    liveness: Liveness,
}

impl<S: MovieSource + ?Sized> CatalogAggregator<S> {
    pub fn new(source: Arc<S>, config: CatalogConfig) -> Self {
        Self {
            source,
            config,
            load_state: RwLock::new(LoadState::Idle),
            state: RwLock::new(CatalogState::default()),
            epoch: AtomicU64::new(0),
            liveness: Liveness::new(),
        }
    }

    pub async fn load_state(&self) -> LoadState {
        *self.load_state.read().await
    }

    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    pub async fn is_loading_more(&self, genre_id: u32) -> bool {
        self.state.read().await.is_loading_more(genre_id)
    }

    /// Liveness handle for this view.
    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Tear the view down; later results are discarded.
    pub fn close(&self) {
        self.liveness.teardown();
    }

    /// Fetch genres, then the first page of every genre concurrently.
    ///
    /// Never fails: a genre list failure yields an empty catalog and a
    /// failed genre yields an empty shelf. Returns the new state.
    pub async fn load(&self) -> CatalogState {
        *self.load_state.write().await = LoadState::Loading;

        let genres = match self.source.list_genres().await {
            Ok(genres) => genres,
            Err(e) => {
                warn!(error = %e, "Genre list unavailable, rendering empty catalog");
                Vec::new()
            }
        };

        debug!(genres = genres.len(), "Fetching first page for every genre");

        let page_size = self.config.page_size;
        let source = &self.source;
        let genre_ids: Vec<u32> = genres.iter().map(|g| g.id).collect();
        let shelves: Vec<(u32, Vec<MovieSummary>)> = stream::iter(genre_ids)
            .map(|genre_id| async move {
                match source.discover_by_genre(genre_id, Some(1)).await {
                    Ok(page) => {
                        let mut movies = page.results;
                        movies.truncate(page_size);
                        (genre_id, movies)
                    }
                    Err(e) => {
                        warn!(genre_id, error = %e, "Genre fetch failed, showing it empty");
                        CATALOG_GENRE_FAILURES
                            .with_label_values(&["initial"])
                            .inc();
                        (genre_id, Vec::new())
                    }
                }
            })
            .buffer_unordered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let mut state = CatalogState {
            genres,
            ..CatalogState::default()
        };
        for (genre_id, movies) in shelves {
            state.movies_by_genre.insert(genre_id, movies);
            state.page_by_genre.insert(genre_id, 1);
        }

        if !self.liveness.is_alive() {
            debug!("Catalog view closed during load, discarding result");
            return state;
        }

        {
            // Installing the new state and bumping the epoch happen under one
            // lock, so any load-more that read the old counter is discarded.
            let mut current = self.state.write().await;
            *current = state.clone();
            self.epoch.fetch_add(1, Ordering::SeqCst);
        }
        *self.load_state.write().await = LoadState::Ready;

        info!(genres = state.genres.len(), "Catalog ready");
        state
    }

    /// Append the next page of `genre_id`, uncapped.
    ///
    /// Only one load-more per genre may run at a time. On failure the page
    /// counter is left alone. Returns the number of movies appended.
    pub async fn load_more(&self, genre_id: u32) -> Result<usize, CatalogError> {
        if !self.liveness.is_alive() {
            return Err(CatalogError::Closed);
        }

        let (next_page, epoch) = {
            let mut state = self.state.write().await;
            if !state.loading_more.insert(genre_id) {
                return Err(CatalogError::LoadInFlight(genre_id));
            }
            (state.page(genre_id) + 1, self.epoch.load(Ordering::SeqCst))
        };

        debug!(genre_id, page = next_page, "Loading more movies");
        let result = self.source.discover_by_genre(genre_id, Some(next_page)).await;

        let mut state = self.state.write().await;
        if !self.liveness.is_alive() {
            return Err(CatalogError::Closed);
        }
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return Err(CatalogError::Reloaded(genre_id));
        }
        state.loading_more.remove(&genre_id);

        match result {
            Ok(page) => {
                let appended = page.results.len();
                state
                    .movies_by_genre
                    .entry(genre_id)
                    .or_default()
                    .extend(page.results);
                state.page_by_genre.insert(genre_id, next_page);
                Ok(appended)
            }
            Err(e) => {
                warn!(genre_id, page = next_page, error = %e, "Load more failed");
                CATALOG_GENRE_FAILURES
                    .with_label_values(&["load_more"])
                    .inc();
                Err(e.into())
            }
        }
    }
}
