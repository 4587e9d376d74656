//! Key index: key -> slot handle into the recency list.
//!
//! The index never owns an entry. Callers remove a key here in the same
//! operation that removes its entry from the list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::list::SlotId;

pub(crate) struct KeyIndex<K> {
    map: HashMap<K, SlotId, RandomState>,
}

impl<K: Hash + Eq> KeyIndex<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Map `key` to `slot`, returning any previous mapping
    pub(crate) fn insert(&mut self, key: K, slot: SlotId) -> Option<SlotId> {
        self.map.insert(key, slot)
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}
