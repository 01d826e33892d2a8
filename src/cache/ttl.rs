//! TTL Cache Module
//!
//! Flat map-backed cache with optional per-entry expiration. Expired entries
//! are reported as missing but left in place until the key is written again,
//! deleted, or swept with [`TtlCache::remove_expired`].

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::Value;
use crate::error::{CacheError, Result};

// == TTL Cache ==
/// Unbounded key/value cache with lazy expiration.
///
/// Reads take a shared lock; every mutation takes the exclusive lock.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Value<V>>>,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Stores a value that never expires, overwriting any previous entry.
    pub fn put(&self, key: K, value: V) {
        self.entries.write().insert(key, Value::new(value));
        trace!("ttl cache: put");
    }

    // == Put With TTL ==
    /// Stores a value that expires `ttl` from now, overwriting any previous
    /// entry. A zero `ttl` stores an entry that is already expired.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.entries.write().insert(key, Value::with_ttl(value, ttl));
        trace!(?ttl, "ttl cache: put with ttl");
    }

    // == Upsert ==
    /// Stores a non-expiring value only if the key has no live entry.
    ///
    /// Returns true if the value was written. The liveness check and the
    /// write share one critical section, so concurrent upserts of the same
    /// key cannot both succeed.
    pub fn upsert(&self, key: K, value: V) -> bool {
        let mut entries = self.entries.write();
        if entries.get(&key).is_some_and(|entry| !entry.is_expired()) {
            return false;
        }
        entries.insert(key, Value::new(value));
        true
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Expired entries are reported as `NotFound` but not removed.
    pub fn get(&self, key: &K) -> Result<V> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                trace!("ttl cache: hit");
                Ok(entry.item().clone())
            }
            _ => {
                trace!("ttl cache: miss");
                Err(CacheError::NotFound)
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Deleting an absent or expired key is a no-op. Returns true if a live
    /// entry was removed.
    pub fn delete(&self, key: &K) -> bool {
        self.entries
            .write()
            .remove(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Remove Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn remove_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "ttl cache: removed expired entries");
        }
        removed
    }

    // == Length ==
    /// Returns the number of stored slots, including expired entries that
    /// have not been cleaned up yet.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_put_and_get() {
        let cache = TtlCache::new();

        cache.put("a", "b");

        assert_eq!(cache.get(&"a"), Ok("b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let cache: TtlCache<&str, i32> = TtlCache::new();
        assert_eq!(cache.get(&"missing"), Err(CacheError::NotFound));
    }

    #[test]
    fn test_overwrite() {
        let cache = TtlCache::new();

        cache.put("key1", "value1");
        cache.put("key1", "value2");

        assert_eq!(cache.get(&"key1"), Ok("value2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_with_ttl_expires() {
        let cache = TtlCache::new();

        cache.put_with_ttl("a", "b", Duration::from_millis(30));
        assert_eq!(cache.get(&"a"), Ok("b"));

        sleep(Duration::from_millis(50));

        assert_eq!(cache.get(&"a"), Err(CacheError::NotFound));
    }

    #[test]
    fn test_expired_entry_is_not_removed_by_get() {
        let cache = TtlCache::new();

        cache.put_with_ttl("a", 1, Duration::ZERO);

        assert_eq!(cache.get(&"a"), Err(CacheError::NotFound));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites_expired_entry() {
        let cache = TtlCache::new();

        cache.put_with_ttl("a", 1, Duration::ZERO);
        cache.put("a", 2);

        assert_eq!(cache.get(&"a"), Ok(2));
    }

    #[test]
    fn test_upsert_inserts_when_absent() {
        let cache = TtlCache::new();

        assert!(cache.upsert("a", 1));
        assert_eq!(cache.get(&"a"), Ok(1));
    }

    #[test]
    fn test_upsert_blocked_by_live_entry() {
        let cache = TtlCache::new();

        cache.put("a", 1);

        assert!(!cache.upsert("a", 2));
        assert_eq!(cache.get(&"a"), Ok(1));
    }

    #[test]
    fn test_upsert_replaces_expired_entry() {
        let cache = TtlCache::new();

        cache.put_with_ttl("a", 1, Duration::ZERO);

        assert!(cache.upsert("a", 2));
        assert_eq!(cache.get(&"a"), Ok(2));
    }

    #[test]
    fn test_delete() {
        let cache = TtlCache::new();

        cache.put("a", 1);

        assert!(cache.delete(&"a"));
        assert_eq!(cache.get(&"a"), Err(CacheError::NotFound));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let cache: TtlCache<&str, i32> = TtlCache::new();

        assert!(!cache.delete(&"a"));
        cache.put("a", 1);
        assert!(cache.delete(&"a"));
        assert!(!cache.delete(&"a"));
    }

    #[test]
    fn test_delete_expired_is_noop() {
        let cache = TtlCache::new();

        cache.put_with_ttl("a", 1, Duration::ZERO);

        assert!(!cache.delete(&"a"));
        assert_eq!(cache.get(&"a"), Err(CacheError::NotFound));
    }

    #[test]
    fn test_remove_expired() {
        let cache = TtlCache::new();

        cache.put_with_ttl("short", 1, Duration::from_millis(20));
        cache.put_with_ttl("long", 2, Duration::from_secs(60));
        cache.put("forever", 3);

        sleep(Duration::from_millis(40));

        assert_eq!(cache.remove_expired(), 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"long"), Ok(2));
        assert_eq!(cache.get(&"forever"), Ok(3));
    }
}
