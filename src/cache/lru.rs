//! LRU Cache Module
//!
//! Capacity-bounded cache combining a HashMap index with an arena recency
//! list for O(1) promotion and eviction, plus per-entry TTL.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::cache::recency::{NodeId, RecencyList};
use crate::cache::Value;
use crate::config::Config;
use crate::error::{CacheError, Result};

// == LRU State ==
/// Everything guarded by the cache lock.
///
/// `index`, `order` and `locator` always hold the same key set.
#[derive(Debug)]
struct LruState<K, V> {
    /// Key-value storage
    index: HashMap<K, Value<V>>,
    /// Access order, front = most recently used
    order: RecencyList<K>,
    /// Key to node in `order`
    locator: HashMap<K, NodeId>,
}

impl<K, V> LruState<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            locator: HashMap::with_capacity(capacity),
        }
    }

    /// Drops a key from all three structures.
    fn remove_entry(&mut self, key: &K) -> Option<Value<V>> {
        if let Some(id) = self.locator.remove(key) {
            self.order.remove(id);
        }
        self.index.remove(key)
    }

    /// Drops the least recently used key. No-op on an empty cache.
    fn evict(&mut self) -> Option<K> {
        let key = self.order.pop_back()?;
        self.locator.remove(&key);
        self.index.remove(&key);
        Some(key)
    }

    fn promote(&mut self, key: &K) {
        if let Some(&id) = self.locator.get(key) {
            self.order.move_to_front(id);
        }
    }

    fn insert(&mut self, key: K, value: Value<V>, capacity: usize) {
        // A stale entry is cleared first so it frees its slot and node.
        if self.index.get(&key).is_some_and(Value::is_expired) {
            self.remove_entry(&key);
            debug!("lru cache: dropped expired entry before overwrite");
        }

        // Overwriting a live key never grows the cache.
        if !self.index.contains_key(&key)
            && self.index.len() >= capacity
            && self.evict().is_some()
        {
            debug!(capacity, "lru cache: evicted least recently used entry");
        }

        self.index.insert(key.clone(), value);

        match self.locator.get(&key) {
            Some(&id) => self.order.move_to_front(id),
            None => {
                let id = self.order.push_front(key.clone());
                self.locator.insert(key, id);
            }
        }
    }

    fn get(&mut self, key: &K) -> Result<V> {
        let value = match self.index.get(key) {
            Some(entry) if entry.is_expired() => None,
            Some(entry) => Some(entry.item().clone()),
            None => {
                trace!("lru cache: miss");
                return Err(CacheError::NotFound);
            }
        };

        let Some(value) = value else {
            self.remove_entry(key);
            debug!("lru cache: removed expired entry on access");
            return Err(CacheError::NotFound);
        };

        self.promote(key);
        trace!("lru cache: hit");
        Ok(value)
    }

    fn remove_expired(&mut self) -> usize {
        let expired: Vec<K> = self
            .index
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }
        expired.len()
    }
}

// == LRU Cache ==
/// Capacity-bounded LRU cache with lazy TTL expiration.
///
/// Every operation, including `get`, takes the exclusive lock because reads
/// reorder recency and may drop expired entries.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Maximum number of entries allowed
    capacity: usize,
    state: Mutex<LruState<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Returns `InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        info!(capacity, "lru cache initialized");
        Ok(Self {
            capacity,
            state: Mutex::new(LruState::with_capacity(capacity)),
        })
    }

    /// Creates a cache sized from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.max_entries)
    }

    // == Put ==
    /// Stores a value that never expires.
    pub fn put(&self, key: K, value: V) {
        self.put_with_ttl(key, value, Duration::ZERO);
    }

    // == Put With TTL ==
    /// Stores a value that expires `ttl` from now and marks it most recently
    /// used. A zero `ttl` means the entry never expires.
    ///
    /// If the key has no live entry and the cache is full, the least recently
    /// used entry is evicted first. Overwriting a live key never evicts.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let value = if ttl.is_zero() {
            Value::new(value)
        } else {
            Value::with_ttl(value, ttl)
        };
        self.state.lock().insert(key, value, self.capacity);
    }

    // == Get ==
    /// Retrieves a live value and marks it most recently used.
    ///
    /// An expired entry is removed on the spot and reported as `NotFound`.
    pub fn get(&self, key: &K) -> Result<V> {
        self.state.lock().get(key)
    }

    // == Delete ==
    /// Removes an entry by key. Returns true if a live entry was removed;
    /// absent keys are a no-op.
    pub fn delete(&self, key: &K) -> bool {
        self.state
            .lock()
            .remove_entry(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Evict ==
    /// Removes the least recently used entry and returns its key.
    ///
    /// Returns None if the cache is empty.
    pub fn evict(&self) -> Option<K> {
        self.state.lock().evict()
    }

    // == Remove Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn remove_expired(&self) -> usize {
        let removed = self.state.lock().remove_expired();
        if removed > 0 {
            debug!(removed, "lru cache: removed expired entries");
        }
        removed
    }

    // == Within Size ==
    /// Checks that the entry count does not exceed capacity.
    pub fn within_size(&self) -> bool {
        self.state.lock().index.len() <= self.capacity
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.state.lock().order.iter().cloned().collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the number of stored entries, including expired entries not
    /// yet observed.
    pub fn len(&self) -> usize {
        self.state.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().index.is_empty()
    }
}

#[cfg(test)]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Panics unless index, order and locator hold the same key set and the
    /// size bound holds.
    pub(crate) fn assert_consistent(&self) {
        let state = self.state.lock();
        assert_eq!(state.index.len(), state.order.len());
        assert_eq!(state.index.len(), state.locator.len());
        assert!(state.index.len() <= self.capacity);
        for key in state.order.iter() {
            assert!(state.index.contains_key(key), "{key:?} missing from index");
            assert!(state.locator.contains_key(key), "{key:?} missing from locator");
        }
    }
}
