//! Recency list: entries ordered from most to least recently used.
//!
//! Entries live in an arena of slots addressed by stable indices. Vacated
//! slots go on a free list and are reused before the arena grows, so a
//! cache never holds more than `capacity` slots.

use std::fmt;

/// Stable handle to a slot in the arena
pub(crate) type SlotId = usize;

/// Link to a neighbouring entry; `None` marks the end of the list
type Link = Option<SlotId>;

/// A single cache record
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    prev: Link,
    next: Link,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Doubly-linked list over an arena of entry slots
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free_list: Vec<SlotId>,
    /// Most recently used
    head: Link,
    /// Least recently used
    tail: Link,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Store a new entry and link it as most recently used
    pub(crate) fn insert_front(&mut self, key: K, value: V) -> SlotId {
        let entry = Entry {
            key,
            value,
            prev: None,
            next: None,
        };

        let slot = match self.free_list.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.push_front(slot);
        self.len += 1;
        slot
    }

    /// Relink an entry as most recently used
    pub(crate) fn move_to_front(&mut self, slot: SlotId) {
        if self.head == Some(slot) {
            return;
        }

        self.unlink(slot);
        self.push_front(slot);
    }

    /// Remove and return the least recently used entry
    pub(crate) fn evict_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Remove the entry in `slot` and free the slot
    pub(crate) fn remove(&mut self, slot: SlotId) -> Option<Entry<K, V>> {
        self.slots.get(slot)?.as_ref()?;

        self.unlink(slot);
        let entry = self.slots[slot].take()?;
        self.free_list.push(slot);
        self.len -= 1;
        Some(entry)
    }

    pub(crate) fn get(&self, slot: SlotId) -> Option<&Entry<K, V>> {
        self.slots.get(slot)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, slot: SlotId) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot)?.as_mut()
    }

    pub(crate) fn front(&self) -> Option<&Entry<K, V>> {
        self.get(self.head?)
    }

    pub(crate) fn back(&self) -> Option<&Entry<K, V>> {
        self.get(self.tail?)
    }

    /// Walk entries from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Link an unlinked entry directly after the front boundary
    fn push_front(&mut self, slot: SlotId) {
        let old_head = self.head;

        if let Some(entry) = &mut self.slots[slot] {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.slots[head_idx] {
                    head.prev = Some(slot);
                }
            }
            None => {
                self.tail = Some(slot);
            }
        }

        self.head = Some(slot);
    }

    /// Detach an entry by rewiring its neighbours
    fn unlink(&mut self, slot: SlotId) {
        let (prev, next) = match &mut self.slots[slot] {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = &mut self.slots[prev_idx] {
                    prev_entry.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_entry) = &mut self.slots[next_idx] {
                    next_entry.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Check link symmetry in both directions and the cached length
    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let entry = self.get(slot).expect("linked slot is vacant");
            assert_eq!(entry.prev, prev, "broken prev link at slot {slot}");
            forward.push(slot);
            prev = Some(slot);
            cursor = entry.next;
            assert!(forward.len() <= self.slots.len(), "cycle in recency list");
        }
        assert_eq!(self.tail, prev);
        assert_eq!(forward.len(), self.len);

        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, self.len);
        assert_eq!(self.slots.len(), self.len + self.free_list.len());
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RecencyList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}

/// Iterator over entries from most to least recently used
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    next: Link,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.next?)?;
        self.next = entry.next;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            next: self.next,
            remaining: self.remaining,
        }
    }
}
