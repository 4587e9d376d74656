//! Error types for lrucache

use std::io;

use thiserror::Error;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction and configuration
///
/// Lookups never fail: a miss is `None`, not an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Capacity must hold at least one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Malformed configuration document
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
