// ABOUTME: Integration tests for the in-memory remote cache
// ABOUTME: Tests TTL expiry, failure handling, single-flight fetches, invalidation, and cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use pulsefit::cache::{CacheConfig, CacheKey, CachePartition, CacheStats, RemoteCache};
use pulsefit::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestData {
    value: String,
    count: u32,
}

fn sample() -> TestData {
    TestData {
        value: "squat".to_owned(),
        count: 3,
    }
}

fn key(partition: CachePartition, operation: &str) -> CacheKey {
    CacheKey::new(partition, operation)
}

/// Fetch that counts its runs and takes `delay` to answer
fn counted(
    calls: &Arc<AtomicUsize>,
    delay: Duration,
) -> impl Future<Output = AppResult<TestData>> + Send + 'static {
    let calls = Arc::clone(calls);
    async move {
        calls.fetch_add(1, Ordering::SeqCst);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(sample())
    }
}

/// Parameters with no JSON form
struct Unkeyable;

impl Serialize for Unkeyable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("no key form"))
    }
}

#[tokio::test]
async fn test_second_call_is_served_from_cache() -> Result<()> {
    common::init_test_logging();
    let cache = common::test_cache(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key(CachePartition::Categories, "all");

    for _ in 0..2 {
        let data: TestData = cache
            .get_or_fetch(&key, || counted(&calls, Duration::ZERO))
            .await?;
        assert_eq!(data, sample());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        cache.stats().await,
        CacheStats {
            hits: 1,
            misses: 1,
            fetches: 1,
            entries: 1,
        }
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_exactly_at_ttl() -> Result<()> {
    let cache = common::test_cache(Duration::from_millis(1000));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key(CachePartition::Details, "exercise:7");
    let fetch = || counted(&calls, Duration::ZERO);

    let _: TestData = cache.get_or_fetch(&key, fetch).await?;
    tokio::time::advance(Duration::from_millis(999)).await;
    let _: TestData = cache.get_or_fetch(&key, fetch).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 1, "still fresh 1ms before TTL");

    tokio::time::advance(Duration::from_millis(1)).await;
    let _: TestData = cache.get_or_fetch(&key, fetch).await?;
    assert_eq!(calls.load(Ordering::SeqCst), 2, "age equal to TTL is stale");
    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(60));
    let key = key(CachePartition::Search, "search:{\"search\":\"row\"}");

    let failed = cache
        .get_or_fetch::<TestData, _, _>(&key, || async {
            Err(AppError::external_unavailable("wger", "connection refused"))
        })
        .await;
    let error = failed.expect_err("fetch error must propagate");
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert!(cache.is_empty().await);

    let data: TestData = cache.get_or_fetch(&key, || async { Ok(sample()) }).await?;
    assert_eq!(data, sample());
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.stats().await.fetches, 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_misses_share_one_fetch() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key(CachePartition::Muscles, "all");
    let fetch = || counted(&calls, Duration::from_millis(200));

    let (first, second, third) = tokio::join!(
        cache.get_or_fetch::<TestData, _, _>(&key, fetch),
        cache.get_or_fetch::<TestData, _, _>(&key, fetch),
        cache.get_or_fetch::<TestData, _, _>(&key, fetch),
    );

    assert_eq!(first?, sample());
    assert_eq!(second?, sample());
    assert_eq!(third?, sample());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.hits + stats.misses, 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_caller_still_stores_late_result() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key(CachePartition::Equipment, "all");

    let slow = cache.get_or_fetch::<TestData, _, _>(&key, || {
        counted(&calls, Duration::from_secs(1))
    });
    let timed_out = tokio::time::timeout(Duration::from_millis(50), slow).await;
    assert!(timed_out.is_err());
    assert!(cache.is_empty().await, "fetch still running");

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(cache.len().await, 1);

    let data: TestData = cache
        .get_or_fetch(&key, || async { Err(AppError::internal("must be served from cache")) })
        .await?;
    assert_eq!(data, sample());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_caller_queued_behind_cancelled_fetch_gets_its_value() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = key(CachePartition::Equipment, "all");

    let slow = cache.get_or_fetch::<TestData, _, _>(&key, || {
        counted(&calls, Duration::from_secs(10))
    });
    assert!(tokio::time::timeout(Duration::from_millis(50), slow)
        .await
        .is_err());

    let queued: TestData = cache
        .get_or_fetch(&key, || async { Err(AppError::internal("queued caller must wait")) })
        .await?;

    assert_eq!(queued, sample());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let stats = cache.stats().await;
    assert_eq!((stats.misses, stats.fetches, stats.entries), (2, 1, 1));
    Ok(())
}

#[tokio::test]
async fn test_unkeyable_params_fetch_uncached() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let data: TestData = cache
            .get_or_fetch_with(CachePartition::Search, "search", &Unkeyable, || {
                counted(&calls, Duration::ZERO)
            })
            .await?;
        assert_eq!(data, sample());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty().await);
    assert_eq!(cache.stats().await.misses, 0);
    Ok(())
}

#[tokio::test]
async fn test_keyed_params_share_one_entry() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));

    for params in [json!({"limit": 20, "offset": 40}), json!({"offset": 40, "limit": 20})] {
        let _: TestData = cache
            .get_or_fetch_with(CachePartition::Exercises, "list", &params, || {
                counted(&calls, Duration::ZERO)
            })
            .await?;
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_invalidate_single_partition() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(60));
    for partition in [
        CachePartition::Categories,
        CachePartition::Search,
        CachePartition::Search,
    ] {
        let key = CacheKey::with_params(partition, "op", &json!({"n": cache.len().await}))?;
        let _: TestData = cache.get_or_fetch(&key, || async { Ok(sample()) }).await?;
    }
    assert_eq!(cache.len().await, 3);

    assert_eq!(cache.invalidate(Some(CachePartition::Search)).await, 2);
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.invalidate(Some(CachePartition::Search)).await, 0);

    assert_eq!(cache.invalidate(None).await, 1);
    assert!(cache.is_empty().await);

    let stats = cache.stats().await;
    assert_eq!(stats.entries, 0);
    assert_eq!((stats.hits, stats.misses, stats.fetches), (0, 3, 3));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_purge_and_peek_age() -> Result<()> {
    let cache = common::test_cache(Duration::from_secs(30));
    let old = key(CachePartition::Images, "exercise:1");
    let young = key(CachePartition::Images, "exercise:2");

    let _: TestData = cache.get_or_fetch(&old, || async { Ok(sample()) }).await?;
    tokio::time::advance(Duration::from_secs(20)).await;
    let _: TestData = cache.get_or_fetch(&young, || async { Ok(sample()) }).await?;

    assert_eq!(cache.peek_age(&old).await, Some(Duration::from_secs(20)));
    assert_eq!(cache.peek_age(&young).await, Some(Duration::ZERO));

    tokio::time::advance(Duration::from_secs(15)).await;
    assert_eq!(cache.peek_age(&old).await, None);
    assert_eq!(cache.purge_expired().await, 1);
    assert_eq!(cache.len().await, 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_background_cleanup_removes_expired_entries() -> Result<()> {
    let cache = RemoteCache::new(&CacheConfig {
        ttl: Duration::from_millis(500),
        max_entries: 100,
        cleanup_interval: Duration::from_secs(1),
        enable_background_cleanup: true,
    });
    let key = key(CachePartition::Videos, "exercise:3");
    let _: TestData = cache.get_or_fetch(&key, || async { Ok(sample()) }).await?;
    assert_eq!(cache.len().await, 1);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert!(cache.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_lru_eviction_at_capacity() -> Result<()> {
    let cache = RemoteCache::new(&CacheConfig {
        ttl: Duration::from_secs(60),
        max_entries: 2,
        cleanup_interval: Duration::from_secs(60),
        enable_background_cleanup: false,
    });

    for id in 1..=3 {
        let key = CacheKey::with_params(CachePartition::Details, "exercise", &id)?;
        let _: TestData = cache.get_or_fetch(&key, || async { Ok(sample()) }).await?;
    }

    assert_eq!(cache.len().await, 2);
    let first = CacheKey::with_params(CachePartition::Details, "exercise", &1)?;
    assert_eq!(cache.peek_age(&first).await, None);
    Ok(())
}

#[test]
fn test_cache_works_without_runtime() {
    let cache = RemoteCache::new(&CacheConfig::default());
    assert_eq!(cache.ttl(), Duration::from_secs(30 * 60));
}
