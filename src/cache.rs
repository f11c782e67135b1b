//! Query result cache
//!
//! Two-tier TTL cache keyed by query string. Entries younger than the
//! fresh window short-circuit the network; entries between the fresh
//! window and the GC horizon are served immediately but flagged for a
//! background refresh; entries past the horizon are dropped lazily on
//! lookup. Bounded: inserting at capacity evicts the oldest entry, so a
//! stream of unique queries cannot grow the cache without limit.
//!
//! All operations take an explicit `Instant` so tests never sleep.

use crate::api::types::SearchResultSet;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Outcome of a cache lookup
#[derive(Debug)]
pub enum CacheLookup {
    /// Young enough to render without touching the network
    Fresh(SearchResultSet),
    /// Renderable, but the caller should refresh in the background
    Stale(SearchResultSet),
    Miss,
}

struct CacheEntry {
    set: SearchResultSet,
    inserted_at: Instant,
}

/// Bounded two-tier TTL cache for search responses
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    fresh_ttl: Duration,
    gc_ttl: Duration,
    capacity: usize,
}

impl QueryCache {
    pub fn new(fresh_ttl: Duration, gc_ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            fresh_ttl,
            gc_ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a query, lazily evicting it if it has aged past the GC horizon
    pub fn lookup(&mut self, query: &str, now: Instant) -> CacheLookup {
        let age = match self.entries.get(query) {
            Some(entry) => now.saturating_duration_since(entry.inserted_at),
            None => return CacheLookup::Miss,
        };

        if age >= self.gc_ttl {
            self.entries.remove(query);
            return CacheLookup::Miss;
        }

        let set = self.entries[query].set.clone();
        if age < self.fresh_ttl {
            CacheLookup::Fresh(set)
        } else {
            CacheLookup::Stale(set)
        }
    }

    /// Insert a response, evicting the oldest entry when at capacity
    pub fn put(&mut self, query: &str, set: SearchResultSet, now: Instant) {
        if !self.entries.contains_key(query) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(q, _)| q.clone())
            {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            query.to_string(),
            CacheEntry {
                set,
                inserted_at: now,
            },
        );
    }
}
