//! Cache statistics tracking

use serde::Serialize;

/// Counters for cache activity
///
/// Only promoting operations count: `peek`, `contains` and iteration leave
/// the counters alone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
    removals: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Lookups that found their key
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that found nothing
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Puts that stored a new key
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// Puts that overwrote an existing key
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Entries dropped to make room for a new key
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Entries removed explicitly (`remove`, `pop_lru`)
    pub fn removals(&self) -> u64 {
        self.removals
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
