//! Read-through query cache shared by the services.
//!
//! Keys name coarse logical queries (`cards:all`, `players:all`, ...), never
//! single entities. Entries live until a mutation clears them; there is no
//! expiry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

/// Hit/miss counters since the cache was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A thread-safe map from query key to result snapshot.
///
/// Every clear bumps a generation counter under the write lock. A reader that
/// loaded from the store on a miss fills the cache with
/// [`QueryCache::put_if_generation`], so a snapshot taken before a concurrent
/// invalidation is never written back.
pub struct QueryCache<V> {
    entries: RwLock<Entries<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

struct Entries<V> {
    map: HashMap<String, V>,
    generation: u64,
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                generation: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a snapshot, recording a hit or a miss.
    pub async fn get(&self, key: &str) -> Option<V> {
        let value = self.entries.read().await.map.get(key).cloned();
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key, "Cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key, "Cache miss");
        }
        value
    }

    /// Store a snapshot, replacing whatever was there.
    pub async fn put(&self, key: impl Into<String>, value: V) {
        self.entries.write().await.map.insert(key.into(), value);
    }

    /// Invalidation generation. Read it before loading a snapshot from the
    /// store and hand it to [`QueryCache::put_if_generation`].
    pub async fn generation(&self) -> u64 {
        self.entries.read().await.generation
    }

    /// Store a snapshot only if nothing was cleared since `seen` was read.
    /// Returns whether the snapshot was stored.
    pub async fn put_if_generation(&self, key: impl Into<String>, value: V, seen: u64) -> bool {
        let mut guard = self.entries.write().await;
        if guard.generation != seen {
            let key = key.into();
            tracing::debug!(key = %key, "Dropping snapshot loaded before invalidation");
            return false;
        }
        guard.map.insert(key.into(), value);
        true
    }

    /// Drop one key. Returns whether it was present.
    pub async fn clear(&self, key: &str) -> bool {
        let mut guard = self.entries.write().await;
        guard.generation += 1;
        guard.map.remove(key).is_some()
    }

    /// Drop every key starting with `prefix` and return how many went.
    pub async fn clear_prefix(&self, prefix: &str) -> usize {
        let mut guard = self.entries.write().await;
        guard.generation += 1;
        let before = guard.map.len();
        guard.map.retain(|key, _| !key.starts_with(prefix));
        let removed = before - guard.map.len();
        tracing::debug!(prefix, removed, "Cache namespace cleared");
        removed
    }

    pub async fn clear_all(&self) {
        let mut guard = self.entries.write().await;
        guard.generation += 1;
        guard.map.clear();
    }

    /// Presence check that does not touch the hit/miss counters.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.map.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.map.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
