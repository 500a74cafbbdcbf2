// ABOUTME: Read-through cache for remote catalog data with TTL expiry and partitioned keys
// ABOUTME: Cache configuration, partition enum, and deterministic request-signature keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory LRU cache with TTL, single-flight fetches, and background cleanup
pub mod memory;

pub use memory::{CacheStats, RemoteCache};

use crate::constants::cache::{
    CACHE_KEY_SEPARATOR, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_MS,
    DEFAULT_CLEANUP_INTERVAL_SECS,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long an entry stays fresh after it was stored
    pub ttl: Duration,
    /// Maximum number of entries before least-recently-used eviction
    pub max_entries: usize,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            // Default to enabled - production code should use background cleanup
            // Tests can explicitly disable by setting to false
            enable_background_cleanup: true,
        }
    }
}

impl CacheConfig {
    /// Load overrides from `CACHE_TTL_MS`, `CACHE_MAX_ENTRIES`, and
    /// `CACHE_CLEANUP_INTERVAL_SECS`, keeping defaults for unset variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set but not a valid
    /// number, or if the resulting configuration fails [`Self::validate`]
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let config = Self {
            ttl: Duration::from_millis(env_parse("CACHE_TTL_MS", DEFAULT_CACHE_TTL_MS)?),
            max_entries: env_parse("CACHE_MAX_ENTRIES", defaults.max_entries)?,
            cleanup_interval: Duration::from_secs(env_parse(
                "CACHE_CLEANUP_INTERVAL_SECS",
                DEFAULT_CLEANUP_INTERVAL_SECS,
            )?),
            enable_background_cleanup: defaults.enable_background_cleanup,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate TTL, capacity, and cleanup interval
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero TTL, zero capacity, or zero
    /// cleanup interval
    pub fn validate(&self) -> AppResult<()> {
        if self.ttl.is_zero() {
            return Err(AppError::config("cache TTL must be greater than zero"));
        }
        if self.max_entries == 0 {
            return Err(AppError::config("cache max_entries must be greater than zero"));
        }
        if self.cleanup_interval.is_zero() {
            return Err(AppError::config(
                "cache cleanup interval must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Parse an optional environment variable, falling back to a default when unset
pub(crate) fn env_parse<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            AppError::config(format!("Invalid value for {name}: '{raw}' ({e})"))
        }),
        Err(_) => Ok(default),
    }
}

/// Independent slot families of the catalog cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePartition {
    /// Paged and filtered exercise lists
    Exercises,
    /// Single exercise lookups
    Details,
    /// Category list
    Categories,
    /// Muscle list
    Muscles,
    /// Equipment list
    Equipment,
    /// Per-exercise images
    Images,
    /// Per-exercise videos
    Videos,
    /// Accumulated search results
    Search,
}

impl CachePartition {
    /// Every partition, in declaration order
    pub const ALL: [Self; 8] = [
        Self::Exercises,
        Self::Details,
        Self::Categories,
        Self::Muscles,
        Self::Equipment,
        Self::Images,
        Self::Videos,
        Self::Search,
    ];

    /// Stable name used as the key prefix
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exercises => "exercises",
            Self::Details => "details",
            Self::Categories => "categories",
            Self::Muscles => "muscles",
            Self::Equipment => "equipment",
            Self::Images => "images",
            Self::Videos => "videos",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for CachePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic request signature
///
/// Two keys are equal exactly when partition, operation, and the canonical
/// form of the parameters are equal, so logically identical requests share a
/// slot regardless of field order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    partition: CachePartition,
    signature: String,
}

impl CacheKey {
    /// Key for a parameterless operation
    #[must_use]
    pub fn new(partition: CachePartition, operation: &str) -> Self {
        Self {
            partition,
            signature: operation.to_owned(),
        }
    }

    /// Key for an operation and its parameters
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `params` cannot be represented as JSON
    pub fn with_params<P>(partition: CachePartition, operation: &str, params: &P) -> AppResult<Self>
    where
        P: Serialize + ?Sized,
    {
        Ok(Self {
            partition,
            signature: build_key(operation, params)?,
        })
    }

    /// Partition this key belongs to
    #[must_use]
    pub const fn partition(&self) -> CachePartition {
        self.partition
    }

    /// Operation name and canonical parameters
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CACHE_KEY_SEPARATOR}{}", self.partition, self.signature)
    }
}

/// Build a request signature from an operation name and its parameters
///
/// Parameters are serialized to JSON, object keys are sorted recursively, and
/// `null` members are dropped, so `{"b":1,"a":null}` and `{"b":1}` produce the
/// same key. A number and a string holding the same digits (`7` vs `"7"`) stay
/// distinct; typed filters keep callers from mixing the two.
///
/// # Errors
///
/// Returns a serialization error if `params` cannot be represented as JSON
pub fn build_key<P>(operation: &str, params: &P) -> AppResult<String>
where
    P: Serialize + ?Sized,
{
    let canonical = canonicalize(serde_json::to_value(params)?);
    match canonical {
        Value::Null => Ok(operation.to_owned()),
        value => Ok(format!(
            "{operation}{CACHE_KEY_SEPARATOR}{}",
            serde_json::to_string(&value)?
        )),
    }
}

/// Sort object keys recursively and strip `null` members
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .filter(|(_, member)| !member.is_null())
                .map(|(key, member)| (key, canonicalize(member)))
                .collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_ignores_field_order_and_nulls() {
        let a = build_key("list", &json!({"offset": 0, "limit": 20, "search": null}));
        let b = build_key("list", &json!({"limit": 20, "offset": 0}));
        assert_eq!(a.ok(), b.ok());
    }

    #[test]
    fn test_numeric_and_string_values_are_distinct() {
        let numeric = build_key("list", &json!({"category": 8}));
        let text = build_key("list", &json!({"category": "8"}));
        assert_ne!(numeric.ok(), text.ok());
    }

    #[test]
    fn test_display_prefixes_partition() {
        let key = CacheKey::new(CachePartition::Categories, "all");
        assert_eq!(key.to_string(), "categories:all");
    }
}
