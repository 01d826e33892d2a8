//! Cache Entry Module
//!
//! Defines the value wrapper shared by both caches: a stored item plus an
//! optional absolute expiration instant.

use std::time::{Duration, Instant};

// == Value ==
/// A stored item with an optional expiration instant.
///
/// Immutable once built; a wrapper without an expiration never expires.
#[derive(Debug, Clone)]
pub struct Value<V> {
    item: V,
    /// Expiration instant, None = no expiration
    expires_at: Option<Instant>,
}

impl<V> Value<V> {
    // == Constructors ==
    /// Wraps an item that never expires.
    pub fn new(item: V) -> Self {
        Self {
            item,
            expires_at: None,
        }
    }

    /// Wraps an item that expires `ttl` from now.
    ///
    /// A zero `ttl` produces an entry that is already expired on the next
    /// observation.
    pub fn with_ttl(item: V, ttl: Duration) -> Self {
        Self {
            item,
            expires_at: Some(Instant::now() + ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current instant has reached its
    /// expiration instant, so a TTL that has fully elapsed is never served.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Accessors ==
    pub fn item(&self) -> &V {
        &self.item
    }

    pub fn into_item(self) -> V {
        self.item
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// Saturates at zero once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
