//! LruCache: the public facade over the recency list and key index

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::KeyIndex;
use crate::list::{self, RecencyList};
use crate::stats::CacheStats;

/// Fixed-capacity key-value cache with least-recently-used eviction
///
/// `get` and `put` are O(1) on average. Every hit and every put moves the
/// touched entry to the most-recently-used position; inserting a new key
/// into a full cache first evicts the least recently used entry.
pub struct LruCache<K, V> {
    /// Owns every entry, ordered by recency
    list: RecencyList<K, V>,

    /// Key -> slot lookup, never owns entries
    index: KeyIndex<K>,

    capacity: NonZeroUsize,

    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, at least 1
    ///
    /// # Returns
    /// * `Result<LruCache>` - `Error::InvalidCapacity` when `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::InvalidCapacity(capacity))?;
        Ok(Self::with_capacity(capacity))
    }

    /// Create a new LRU cache from an already validated capacity
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        debug!(capacity = capacity.get(), "creating LRU cache");

        Self {
            list: RecencyList::with_capacity(capacity.get()),
            index: KeyIndex::with_capacity(capacity.get()),
            capacity,
            stats: CacheStats::new(),
        }
    }

    /// Get a value, marking it most recently used
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.lookup(key) {
            Some(slot) => {
                self.stats.record_hit();
                self.list.move_to_front(slot);
                self.list.get(slot).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Mutable counterpart of [`get`](Self::get); also promotes the entry
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.lookup(key) {
            Some(slot) => {
                self.stats.record_hit();
                self.list.move_to_front(slot);
                self.list.get_mut(slot).map(|entry| &mut entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert or overwrite a key-value pair, marking it most recently used
    pub fn put(&mut self, key: K, value: V) {
        self.push(key, value);
    }

    /// Like [`put`](Self::put), but returns whatever was displaced
    ///
    /// # Returns
    /// * `Some((key, old_value))` when `key` was already cached; the stored
    ///   key is kept and the passed-in `key` is handed back
    /// * `Some((lru_key, lru_value))` when a new key evicted the LRU entry
    /// * `None` when a new key fit without eviction
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.index.lookup(&key) {
            // Update existing
            self.list.move_to_front(slot);
            self.stats.record_update();

            let displaced = self
                .list
                .get_mut(slot)
                .map(|entry| (key, mem::replace(&mut entry.value, value)));
            debug_assert!(displaced.is_some(), "index references a vacant slot");
            return displaced;
        }

        // Insert new
        let evicted = if self.list.len() >= self.capacity.get() {
            let victim = self.take_lru();
            if victim.is_some() {
                self.stats.record_eviction();
                trace!(len = self.list.len(), "evicted least recently used entry");
            }
            victim
        } else {
            None
        };

        let slot = self.list.insert_front(key.clone(), value);
        let stale = self.index.insert(key, slot);
        debug_assert!(stale.is_none(), "new key already had an index mapping");
        self.stats.record_insert();

        self.debug_check();
        evicted
    }

    /// Read a value without changing its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.lookup(key)?;
        self.list.get(slot).map(|entry| &entry.value)
    }

    /// Check for a key without changing its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        let entry = self.list.remove(slot);
        debug_assert!(entry.is_some(), "index references a vacant slot");

        self.stats.record_removal();
        self.debug_check();
        entry.map(|entry| entry.value)
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let popped = self.take_lru()?;
        self.stats.record_removal();
        Some(popped)
    }

    /// Clear the cache (statistics are kept)
    pub fn clear(&mut self) {
        debug!(len = self.list.len(), "clearing LRU cache");
        self.list.clear();
        self.index.clear();
    }

    /// Evict the back of the list and drop its index mapping
    fn take_lru(&mut self) -> Option<(K, V)> {
        let victim = self.list.evict_back()?;
        let removed = self.index.remove(&victim.key);
        debug_assert!(removed.is_some(), "evicted key missing from index");

        self.debug_check();
        Some(victim.into_pair())
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.index.len(),
            self.list.len(),
            "index and recency list diverged"
        );
        debug_assert!(
            self.list.len() <= self.capacity.get(),
            "cache exceeded its capacity"
        );
    }

    /// Walk every invariant: sizes, link symmetry, index/list agreement
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.list.assert_links();
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.capacity.get());

        for entry in self.list.iter() {
            let slot = self
                .index
                .lookup(&entry.key)
                .expect("listed key missing from index");
            let indexed = self.list.get(slot).expect("index points at a vacant slot");
            assert!(std::ptr::eq(indexed, entry), "key maps to another entry");
        }
    }
}

impl<K, V> LruCache<K, V> {
    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Least recently used entry, the next eviction victim
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Most recently used entry
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterate entries from most to least recently used, without promoting
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero the statistics counters
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.list)
            .finish()
    }
}

/// Iterator over cache entries from most to least recently used
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
