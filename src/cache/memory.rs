// ABOUTME: In-memory read-through cache with LRU eviction, TTL expiry, and per-key single-flight
// ABOUTME: Includes background cleanup task for expired entries and hit/miss counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheKey, CachePartition};
use crate::errors::{AppError, AppResult};
use dashmap::DashMap;
use lru::LruCache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, OwnedMutexGuard, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Stored value and the instant it was written
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
        }
    }

    fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.stored_at)
    }

    /// Valid while strictly younger than the TTL
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

type Store = Arc<RwLock<LruCache<CacheKey, CacheEntry>>>;

/// Serialize a fetched value for storage, `None` if it has no JSON form
fn encode<T: Serialize>(key: &CacheKey, value: &T) -> Option<Vec<u8>> {
    match serde_json::to_vec(value) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!(cache.key = %key, error = %e, "Failed to serialize value, not caching");
            None
        }
    }
}

/// Counter snapshot returned by [`RemoteCache::stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Calls answered from a fresh entry on arrival
    pub hits: u64,
    /// Calls that found no fresh entry on arrival
    pub misses: u64,
    /// Fetcher invocations; below `misses` when concurrent misses were coalesced
    pub fetches: u64,
    /// Entries currently stored, including expired ones not yet purged
    pub entries: usize,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    fetches: AtomicU64,
}

/// Signals the cleanup task to stop once the last cache handle is dropped
struct CleanupTask {
    shutdown_tx: mpsc::Sender<()>,
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        // Errors are expected if the task already exited
        if let Err(e) = self.shutdown_tx.try_send(()) {
            debug!(error = ?e, "Cache shutdown signal send failed (channel likely closed)");
        }
    }
}

/// Read-through cache for remote catalog responses
///
/// Values are stored as serialized JSON so one instance can hold every
/// response type. Handles are cheap to clone and share the same store.
///
/// Concurrent misses for the same key are coalesced: the first caller starts
/// the fetch while the others wait on a per-key lock and then read the
/// stored value. Failed fetches are never stored.
#[derive(Clone)]
pub struct RemoteCache {
    store: Store,
    in_flight: Arc<DashMap<CacheKey, Arc<Mutex<()>>>>,
    counters: Arc<Counters>,
    ttl: Duration,
    _cleanup: Option<Arc<CleanupTask>>,
}

impl RemoteCache {
    /// Fallback capacity when config specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache, spawning the cleanup task when enabled
    ///
    /// Background cleanup requires a running tokio runtime; without one the
    /// cache still works and expired entries are dropped lazily on read.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);
        let store: Store = Arc::new(RwLock::new(LruCache::new(capacity)));

        let cleanup = if config.enable_background_cleanup {
            Self::spawn_cleanup(&store, config.ttl, config.cleanup_interval)
        } else {
            None
        };

        Self {
            store,
            in_flight: Arc::new(DashMap::new()),
            counters: Arc::new(Counters::default()),
            ttl: config.ttl,
            _cleanup: cleanup,
        }
    }

    fn spawn_cleanup(
        store: &Store,
        ttl: Duration,
        cleanup_interval: Duration,
    ) -> Option<Arc<CleanupTask>> {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No tokio runtime available, cache background cleanup disabled");
            return None;
        };

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let store = Arc::clone(store);

        handle.spawn(async move {
            let mut interval = tokio::time::interval(cleanup_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        Self::cleanup_expired(&store, ttl).await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Cache cleanup task received shutdown signal");
                        break;
                    }
                }
            }
        });

        Some(Arc::new(CleanupTask { shutdown_tx }))
    }

    /// Remove all expired entries from the store
    async fn cleanup_expired(store: &Store, ttl: Duration) -> usize {
        let mut store_guard = store.write().await;

        let expired_keys: Vec<CacheKey> = store_guard
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            store_guard.pop(key);
        }
        drop(store_guard);

        let removed = expired_keys.len();
        if removed > 0 {
            debug!("Cleaned up {} expired cache entries", removed);
        }
        removed
    }

    /// Configured time-to-live
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the fresh cached value for `key`, or run `fetcher` and store its result
    ///
    /// Fetch errors propagate and leave the cache untouched. If the fetched
    /// value cannot be serialized for storage it is still returned, uncached.
    ///
    /// The fetch runs on its own task. A caller that is dropped mid-fetch
    /// stops waiting, but the fetch completes and its value is stored, and
    /// callers queued behind it are served from that value.
    ///
    /// # Errors
    ///
    /// Returns whatever error `fetcher` returns, or `InternalError` if the
    /// fetch task panicked
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &CacheKey, fetcher: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        if let Some(value) = self.lookup(key).await {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            debug!(cache.key = %key, "Cache hit");
            return Ok(value);
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        let gate = Arc::clone(
            self.in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        let guard = Arc::clone(&gate).lock_owned().await;

        // Another caller may have stored the value while we waited
        if let Some(value) = self.lookup(key).await {
            debug!(cache.key = %key, "Cache filled by concurrent fetch");
            self.release_gate(key, gate, guard);
            return Ok(value);
        }

        debug!(cache.key = %key, "Cache miss, fetching");
        self.counters.fetches.fetch_add(1, Ordering::Relaxed);
        let fetch = fetcher();
        let cache = self.clone();
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let result = fetch.await;
            let encoded = result.as_ref().ok().and_then(|value| encode(&task_key, value));
            if let Some(data) = encoded {
                cache.store_entry(&task_key, data).await;
            }
            if let Err(error) = &result {
                warn!(cache.key = %task_key, error = %error, "Fetch failed, nothing cached");
            }
            cache.release_gate(&task_key, gate, guard);
            result
        });

        task.await
            .map_err(|e| AppError::internal(format!("Cache fetch task failed: {e}")))?
    }

    /// Like [`Self::get_or_fetch`], building the key from `operation` and `params`
    ///
    /// If `params` cannot be turned into a key the fetch still runs, uncached.
    ///
    /// # Errors
    ///
    /// Returns whatever error `fetcher` returns
    pub async fn get_or_fetch_with<T, P, F, Fut>(
        &self,
        partition: CachePartition,
        operation: &str,
        params: &P,
        fetcher: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        P: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        match CacheKey::with_params(partition, operation, params) {
            Ok(key) => self.get_or_fetch(&key, fetcher).await,
            Err(e) => {
                warn!(
                    %partition,
                    operation,
                    error = %e,
                    "Cache key unavailable, fetching uncached"
                );
                fetcher().await
            }
        }
    }

    /// Unlock the per-key gate and drop it once no caller is waiting on it
    fn release_gate(&self, key: &CacheKey, gate: Arc<Mutex<()>>, guard: OwnedMutexGuard<()>) {
        drop(guard);
        // Map entry plus `gate` means no other caller is waiting
        self.in_flight
            .remove_if(key, |_, entry| Arc::strong_count(entry) <= 2);
        drop(gate);
    }

    /// Fresh value for `key`, dropping expired or unreadable entries
    async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let mut store = self.store.write().await;

        // LruCache::get is mutable (updates access order for LRU)
        let entry = store.get(key)?;
        if !entry.is_fresh(self.ttl) {
            store.pop(key);
            drop(store);
            debug!(cache.key = %key, "Cache entry expired");
            return None;
        }

        match serde_json::from_slice(&entry.data) {
            Ok(value) => Some(value),
            Err(e) => {
                store.pop(key);
                drop(store);
                warn!(cache.key = %key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    async fn store_entry(&self, key: &CacheKey, data: Vec<u8>) {
        // LruCache handles eviction automatically on push
        self.store
            .write()
            .await
            .push(key.clone(), CacheEntry::new(data));
    }

    /// Drop cached entries
    ///
    /// `None` clears every partition; `Some(partition)` clears only that
    /// partition. Returns the number of entries removed.
    pub async fn invalidate(&self, partition: Option<CachePartition>) -> usize {
        let mut store = self.store.write().await;
        let removed = match partition {
            None => {
                let removed = store.len();
                store.clear();
                removed
            }
            Some(partition) => {
                let keys: Vec<CacheKey> = store
                    .iter()
                    .filter(|(key, _)| key.partition() == partition)
                    .map(|(key, _)| key.clone())
                    .collect();
                for key in &keys {
                    store.pop(key);
                }
                keys.len()
            }
        };
        drop(store);

        debug!(
            partition = partition.map_or("all", CachePartition::as_str),
            removed, "Cache invalidated"
        );
        removed
    }

    /// Remove every expired entry now, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        Self::cleanup_expired(&self.store, self.ttl).await
    }

    /// Age of the fresh entry stored under `key`, without touching LRU order
    pub async fn peek_age(&self, key: &CacheKey) -> Option<Duration> {
        let store = self.store.read().await;
        let age = store
            .peek(key)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(CacheEntry::age);
        drop(store);
        age
    }

    /// Number of stored entries, including expired ones not yet purged
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Snapshot of hit, miss, and fetch counters
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            fetches: self.counters.fetches.load(Ordering::Relaxed),
            entries: self.len().await,
        }
    }
}
