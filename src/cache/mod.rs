//! Cache Module
//!
//! Provides a flat TTL cache and a capacity-bounded LRU cache sharing one
//! value wrapper.

mod entry;
mod lru;
mod recency;
mod ttl;


// Re-export public types
pub use entry::Value;
pub use lru::LruCache;
pub use recency::{NodeId, RecencyList};
pub use ttl::TtlCache;
