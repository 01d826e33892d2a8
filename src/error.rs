//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for both cache flavours.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No live entry for the key (absent or expired). A normal cache miss.
    #[error("Key not found")]
    NotFound,

    /// LRU cache constructed with a capacity it cannot honour
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
