//! Lock-striped concurrent map and set.
//!
//! Both containers partition their entries into a fixed number of shards,
//! each guarded by its own mutex. Operations on keys that land in different
//! shards never block each other; operations on the same key are strictly
//! serialized. They are used as scatter-gather accumulators: many workers
//! write concurrently, then a single caller drains every shard into one
//! ordinary container once the writers have quiesced.
//!
//! Draining is *not* safe to run concurrently with writers. Callers must
//! separate the write phase from the drain phase with an explicit join
//! (rayon's blocking iterators provide this barrier naturally).

use std::hash::Hash;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// Default number of shards for the per-query accumulators.
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Deterministic shard selection for container keys.
pub trait ShardKey {
    /// Index of the shard owning this key, in `0..shard_count`.
    fn shard_index(&self, shard_count: usize) -> usize;
}

impl ShardKey for i32 {
    fn shard_index(&self, shard_count: usize) -> usize {
        (*self as i64).rem_euclid(shard_count as i64) as usize
    }
}

impl ShardKey for &str {
    fn shard_index(&self, shard_count: usize) -> usize {
        match self.as_bytes().first() {
            Some(&b) => b as usize % shard_count,
            None => 0,
        }
    }
}

impl ShardKey for Arc<str> {
    fn shard_index(&self, shard_count: usize) -> usize {
        (&**self).shard_index(shard_count)
    }
}

/// A map partitioned into independently locked shards.
///
/// `access` hands out an exclusive handle to one key's value while holding
/// only that key's shard lock, so concurrent accumulation from many workers
/// is safe and mostly uncontended.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<AHashMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: ShardKey + Eq + Hash,
    V: Default,
{
    /// Create a map with the given number of shards.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ConcurrentMap {
            shards: (0..shard_count).map(|_| Mutex::new(AHashMap::new())).collect(),
        }
    }

    /// Exclusive handle to the value stored under `key`.
    ///
    /// Inserts `V::default()` if the key is absent. The owning shard stays
    /// locked for the lifetime of the returned guard.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        MutexGuard::map(shard.lock(), |store| store.entry(key).or_default())
    }

    /// Remove `key`, locking only its owning shard.
    pub fn erase(&self, key: &K) {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        shard.lock().remove(key);
    }

    /// Drain every shard into one ordinary map.
    ///
    /// Locks the shards one at a time; writers must have quiesced first.
    pub fn build_ordinary_map(&self) -> AHashMap<K, V> {
        let mut result = AHashMap::new();
        for shard in &self.shards {
            result.extend(shard.lock().drain());
        }
        result
    }
}

/// A set partitioned into independently locked shards.
///
/// Shard selection hashes the value's leading element, so values with
/// different first characters proceed independently.
#[derive(Debug)]
pub struct ConcurrentSet<V> {
    shards: Vec<Mutex<AHashSet<V>>>,
}

impl<V> ConcurrentSet<V>
where
    V: ShardKey + Eq + Hash,
{
    /// Create a set with the given number of shards.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ConcurrentSet {
            shards: (0..shard_count).map(|_| Mutex::new(AHashSet::new())).collect(),
        }
    }

    /// Insert a value, locking only its owning shard.
    pub fn insert(&self, value: V) {
        let shard = &self.shards[value.shard_index(self.shards.len())];
        shard.lock().insert(value);
    }

    /// Remove a value, locking only its owning shard.
    pub fn erase(&self, value: &V) {
        let shard = &self.shards[value.shard_index(self.shards.len())];
        shard.lock().remove(value);
    }

    /// Drain every shard into one ordinary set.
    ///
    /// Locks the shards one at a time; writers must have quiesced first.
    pub fn build_ordinary_set(&self) -> AHashSet<V> {
        let mut result = AHashSet::new();
        for shard in &self.shards {
            result.extend(shard.lock().drain());
        }
        result
    }
}
