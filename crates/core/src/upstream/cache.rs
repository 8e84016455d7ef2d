//! Freshness window for upstream responses.
//!
//! A successful response may be reused for an identical request until it is
//! older than the configured TTL. Entries are never revalidated. An expired
//! entry is dropped when it is looked up, and inserts sweep out every expired
//! entry at most once per TTL. The map never holds more than `max_entries`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::{UpstreamRequest, UpstreamResponse};

/// Default upper bound on cached responses.
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

#[derive(Debug, Clone)]
struct CachedResponse {
    stored_at: Instant,
    response: UpstreamResponse,
}

#[derive(Debug)]
struct Entries {
    map: HashMap<UpstreamRequest, CachedResponse>,
    last_sweep: Instant,
}

/// In-memory response cache keyed by request.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<Entries>,
}

impl ResponseCache {
    /// Create a cache; a zero TTL disables it.
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    /// Create a cache holding at most `max_entries` responses. When full, the
    /// oldest entry is evicted.
    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Fresh response for this request, if any.
    pub async fn get(&self, request: &UpstreamRequest) -> Option<UpstreamResponse> {
        if !self.is_enabled() {
            return None;
        }

        {
            let entries = self.entries.read().await;
            match entries.map.get(request) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.response.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it unless a concurrent writer already refreshed it.
        let mut entries = self.entries.write().await;
        if entries
            .map
            .get(request)
            .is_some_and(|e| e.stored_at.elapsed() >= self.ttl)
        {
            entries.map.remove(request);
        }
        None
    }

    /// Store a response. Only successful responses are worth reusing.
    pub async fn insert(&self, request: UpstreamRequest, response: UpstreamResponse) {
        if !self.is_enabled() || !response.is_success() {
            return;
        }

        let mut entries = self.entries.write().await;
        if entries.last_sweep.elapsed() >= self.ttl {
            let ttl = self.ttl;
            entries.map.retain(|_, entry| entry.stored_at.elapsed() < ttl);
            entries.last_sweep = Instant::now();
        }
        if entries.map.len() >= self.max_entries && !entries.map.contains_key(&request) {
            let oldest = entries
                .map
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.map.remove(&oldest);
            }
        }
        entries.map.insert(
            request,
            CachedResponse {
                stored_at: Instant::now(),
                response,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.map.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.map.clear();
    }
}
