// ABOUTME: Cache-related constants for TTL, capacity, and cleanup intervals
// ABOUTME: Defaults for the in-memory catalog response cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default time-to-live for cached catalog responses in milliseconds (30 minutes)
pub const DEFAULT_CACHE_TTL_MS: u64 = 1_800_000;

/// Default maximum cache entries before least-recently-used eviction
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Default cleanup interval in seconds for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// Separator between the partition, operation, and parameter segments of a key
pub const CACHE_KEY_SEPARATOR: char = ':';
