//! # lrucache
//!
//! Fixed-capacity Least-Recently-Used cache.
//!
//! ## Architecture
//! - **Recency List**: doubly-linked list over a slot arena, MRU at the front (O(1) relinking)
//! - **Key Index**: AHash map from key to slot handle (O(1) lookup)
//! - **Facade**: [`LruCache`] keeps both in step and evicts from the back
//!
//! A miss is `None`; the only error is constructing a cache that cannot hold
//! anything.
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"one"));
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod index;
mod list;
mod stats;

pub use cache::{Iter, LruCache};
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use stats::CacheStats;
