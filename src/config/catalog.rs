// ABOUTME: Exercise catalog client configuration with environment overrides
// ABOUTME: Base URL, language filter, page size, search bounds, and HTTP timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::env_parse;
use crate::constants::catalog::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, ENGLISH_LANGUAGE_ID,
    SEARCH_HARD_CAP, SEARCH_MIN_RESULTS, WGER_API_BASE,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Exercise catalog client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// REST API base URL, without trailing slash
    pub base_url: String,
    /// Language identifier for translated names and descriptions
    pub language_id: u32,
    /// Page size used while accumulating search results
    pub page_size: u32,
    /// Stop accumulating search pages once this many records are collected
    pub search_hard_cap: usize,
    /// Issue a supplementary name query when a text search yields fewer results
    pub search_min_results: usize,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: WGER_API_BASE.to_owned(),
            language_id: ENGLISH_LANGUAGE_ID,
            page_size: DEFAULT_PAGE_SIZE,
            search_hard_cap: SEARCH_HARD_CAP,
            search_min_results: SEARCH_MIN_RESULTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl CatalogConfig {
    /// Load overrides from `CATALOG_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is malformed or the result
    /// fails [`Self::validate`]
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let base_url = env::var("CATALOG_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .unwrap_or(defaults.base_url);

        let config = Self {
            base_url,
            language_id: env_parse("CATALOG_LANGUAGE_ID", defaults.language_id)?,
            page_size: env_parse("CATALOG_PAGE_SIZE", defaults.page_size)?,
            search_hard_cap: env_parse("CATALOG_SEARCH_HARD_CAP", defaults.search_hard_cap)?,
            search_min_results: env_parse(
                "CATALOG_SEARCH_MIN_RESULTS",
                defaults.search_min_results,
            )?,
            timeout_secs: env_parse("CATALOG_TIMEOUT_SECS", defaults.timeout_secs)?,
            connect_timeout_secs: env_parse(
                "CATALOG_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate URL scheme, paging bounds, and timeouts
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "catalog base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.page_size == 0 {
            return Err(AppError::config("catalog page_size must be greater than zero"));
        }
        if self.search_hard_cap == 0 {
            return Err(AppError::config(
                "catalog search_hard_cap must be greater than zero",
            ));
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(AppError::config("catalog timeouts must be greater than zero"));
        }
        Ok(())
    }
}
