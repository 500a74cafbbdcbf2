// ABOUTME: Main library entry point for the pulsefit metrics engine and catalog client
// ABOUTME: Wires the remote catalog cache, configuration, and logging around the core crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pulsefit
//!
//! Derived fitness metrics and a cached client for a read-only, paginated
//! exercise catalog.
//!
//! ## Architecture
//!
//! - **Intelligence**: pure calculators for BMR, TDEE, macros, workout
//!   calories, streaks, and weekly volume (`pulsefit-intelligence`)
//! - **Cache**: TTL read-through cache with partitioned, order-independent keys
//! - **Catalog**: the [`catalog::ExerciseCatalog`] seam, multi-page search
//!   accumulation, and the wger REST client
//! - **Config**: environment-driven settings for all of the above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pulsefit::cache::RemoteCache;
//! use pulsefit::catalog::{CatalogService, WgerCatalog};
//! use pulsefit::config::PulsefitConfig;
//! use pulsefit::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     pulsefit::logging::init_from_env()?;
//!     let config = PulsefitConfig::from_env()?;
//!
//!     let catalog = WgerCatalog::new(&config.catalog)?;
//!     let cache = RemoteCache::new(&config.cache);
//!     let service = CatalogService::new(catalog, cache, &config.catalog);
//!
//!     let squats = service.search("squat", &Default::default()).await?;
//!     println!("{} exercises", squats.len());
//!     Ok(())
//! }
//! ```

// Re-export pulsefit-core modules so `crate::errors::*` etc. resolve here too
pub use pulsefit_core::constants;
pub use pulsefit_core::errors;
pub use pulsefit_core::models;
pub use pulsefit_core::pagination;

/// Derived fitness metrics engine
pub use pulsefit_intelligence as intelligence;

/// Read-through cache for remote catalog responses
pub mod cache;

/// Exercise catalog consumption: trait seam, search, cached service, wger client
pub mod catalog;

/// Environment-driven configuration
pub mod config;

/// Structured logging setup
pub mod logging;
