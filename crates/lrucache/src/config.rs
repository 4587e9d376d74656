//! Cache configuration
//!
//! TOML layout:
//! ```toml
//! capacity = 4096
//! ```

use std::fs;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::LruCache;
use crate::error::{Error, Result};

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 1024;

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Settings for building an [`LruCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of entries
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check the capacity, returning it as a non-zero count
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).ok_or(Error::InvalidCapacity(self.capacity))
    }

    /// Build an empty cache from this config
    pub fn build<K, V>(&self) -> Result<LruCache<K, V>>
    where
        K: Hash + Eq + Clone,
    {
        Ok(LruCache::with_capacity(self.validate()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);

        // Empty document falls back to the default
        let parsed = CacheConfig::from_toml_str("").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_parse() {
        let config = CacheConfig::from_toml_str("capacity = 16").unwrap();
        assert_eq!(config.capacity, 16);

        let cache = config.build::<u64, String>().unwrap();
        assert_eq!(cache.capacity(), 16);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_config_zero_capacity() {
        let result = CacheConfig::from_toml_str("capacity = 0");
        assert!(matches!(result, Err(Error::InvalidCapacity(0))));

        let result = CacheConfig::new(0).build::<u32, u32>();
        assert!(matches!(result, Err(Error::InvalidCapacity(0))));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result = CacheConfig::from_toml_str("capacity = 4\nttl = 30");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_rejects_bad_types() {
        assert!(matches!(
            CacheConfig::from_toml_str("capacity = \"big\""),
            Err(Error::Config(_))
        ));
        // Negative numbers do not fit usize
        assert!(matches!(
            CacheConfig::from_toml_str("capacity = -1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = CacheConfig::load("/nonexistent/lrucache.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
