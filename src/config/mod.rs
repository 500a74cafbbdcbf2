// ABOUTME: Configuration management for the catalog client, remote cache, and nutrition coefficients
// ABOUTME: Loads overrides from environment variables on top of documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Catalog**: upstream base URL, language, paging limits, and HTTP timeouts
//! - **Cache**: TTL, capacity, and cleanup cadence (see [`crate::cache::CacheConfig`])
//! - **Nutrition**: formula coefficients (see [`NutritionConfig`])

/// Exercise catalog client configuration
pub mod catalog;

pub use catalog::CatalogConfig;
pub use pulsefit_intelligence::config::{ConfigError, NutritionConfig};

use crate::cache::CacheConfig;
use crate::errors::AppResult;
use tracing::{debug, info};

/// Complete configuration for a catalog service and metrics engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PulsefitConfig {
    /// Remote cache settings
    pub cache: CacheConfig,
    /// Catalog client settings
    pub catalog: CatalogConfig,
    /// Nutrition formula coefficients
    pub nutrition: NutritionConfig,
}

impl PulsefitConfig {
    /// Load cache and catalog settings from the environment
    ///
    /// Nutrition coefficients keep their defaults; override them in code.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is malformed or the
    /// resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            cache: CacheConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
            nutrition: NutritionConfig::default(),
        };
        config.validate()?;

        info!(
            catalog.base_url = %config.catalog.base_url,
            cache.ttl_ms = config.cache.ttl.as_millis(),
            cache.max_entries = config.cache.max_entries,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first configuration error found
    pub fn validate(&self) -> AppResult<()> {
        self.cache.validate()?;
        self.catalog.validate()?;
        self.nutrition.validate()?;
        debug!("Configuration validated");
        Ok(())
    }
}
