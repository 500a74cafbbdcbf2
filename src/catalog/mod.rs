// ABOUTME: Consumption layer for the read-only, paginated exercise catalog service
// ABOUTME: Catalog trait, list query type, search accumulation, cached service, and wger client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Catalog
//!
//! [`ExerciseCatalog`] is the seam between the cache and the network. The
//! production implementation is [`wger::WgerCatalog`]; tests substitute a
//! scripted in-memory catalog.

/// Page accumulation with client-side text filtering
pub mod search;
/// Cached catalog operations, one cache partition each
pub mod service;
/// wger REST API client and record normalization
pub mod wger;

pub use search::{accumulate_pages, search_paginated, SearchOptions};
pub use service::CatalogService;
pub use wger::WgerCatalog;

use crate::constants::catalog::DETAIL_LIST_PAGE_SIZE;
use crate::errors::AppResult;
use crate::models::{
    Category, Equipment, Exercise, ExerciseFilters, ExerciseImage, ExerciseVideo, Muscle,
};
use crate::pagination::{OffsetPage, PageRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters for one exercise list request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExerciseQuery {
    /// Maximum records in the page
    pub limit: u32,
    /// Zero-based index of the first record
    pub offset: u32,
    /// Category, muscle, and equipment restrictions
    #[serde(default)]
    pub filters: ExerciseFilters,
    /// Server-side name match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for ExerciseQuery {
    fn default() -> Self {
        Self {
            limit: DETAIL_LIST_PAGE_SIZE,
            offset: 0,
            filters: ExerciseFilters::default(),
            name: None,
        }
    }
}

impl ExerciseQuery {
    /// Query for one page with the given filters
    #[must_use]
    pub const fn page(page: PageRequest, filters: ExerciseFilters) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            filters,
            name: None,
        }
    }

    /// Restrict to records whose name matches `name` server-side
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Read-only exercise catalog
///
/// Implementations return normalized records and report failures as
/// upstream errors; they never collapse a failure into an empty result.
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// One page of exercises
    async fn list_exercises(&self, query: &ExerciseQuery) -> AppResult<OffsetPage<Exercise>>;

    /// A single exercise, `ResourceNotFound` if it does not exist
    async fn get_exercise(&self, id: u32) -> AppResult<Exercise>;

    /// All exercise categories
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// All muscles
    async fn list_muscles(&self) -> AppResult<Vec<Muscle>>;

    /// All equipment
    async fn list_equipment(&self) -> AppResult<Vec<Equipment>>;

    /// Images attached to an exercise
    async fn list_images(&self, exercise_id: u32) -> AppResult<Vec<ExerciseImage>>;

    /// Videos attached to an exercise
    async fn list_videos(&self, exercise_id: u32) -> AppResult<Vec<ExerciseVideo>>;
}
