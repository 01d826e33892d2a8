//! Lazy Cache - An in-process key/value cache library
//!
//! Provides a flat TTL cache and a capacity-bounded LRU cache, both with
//! lazy (on-access) expiration.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{LruCache, TtlCache, Value};
pub use config::Config;
pub use error::{CacheError, Result};
