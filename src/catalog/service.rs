// ABOUTME: Cached exercise catalog operations backed by the remote cache
// ABOUTME: Each operation owns one cache partition and builds keys from its typed parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::search::{search_paginated, SearchOptions};
use super::{ExerciseCatalog, ExerciseQuery};
use crate::cache::{CachePartition, RemoteCache};
use crate::config::CatalogConfig;
use crate::constants::catalog::WORKOUT_LIST_PAGE_SIZE;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::models::{
    Category, Equipment, Exercise, ExerciseFilters, ExerciseImage, ExerciseVideo, Muscle,
};
use crate::pagination::{OffsetPage, PageRequest};
use serde_json::json;
use std::sync::Arc;

/// Catalog access through a read-through cache
///
/// Owned by the application's composition root; tests build one per case
/// with their own cache and catalog double. The catalog is shared with the
/// cache's fetch tasks, which may outlive the request that started them.
pub struct CatalogService<C> {
    catalog: Arc<C>,
    cache: RemoteCache,
    search_options: SearchOptions,
}

impl<C: ExerciseCatalog + 'static> CatalogService<C> {
    /// Create a service over `catalog` using `cache`
    #[must_use]
    pub fn new(catalog: C, cache: RemoteCache, config: &CatalogConfig) -> Self {
        Self::with_search_options(catalog, cache, SearchOptions::from(config))
    }

    /// Create a service with explicit search bounds
    #[must_use]
    pub fn with_search_options(
        catalog: C,
        cache: RemoteCache,
        search_options: SearchOptions,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cache,
            search_options,
        }
    }

    /// Underlying catalog
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Underlying cache
    pub const fn cache(&self) -> &RemoteCache {
        &self.cache
    }

    /// One page of exercises
    ///
    /// # Errors
    ///
    /// Returns the upstream error if the page cannot be fetched
    pub async fn exercises(&self, limit: u32, offset: u32) -> AppResult<OffsetPage<Exercise>> {
        let catalog = Arc::clone(&self.catalog);
        let query = ExerciseQuery::page(
            PageRequest::new(offset, limit),
            ExerciseFilters::default(),
        );
        self.cache
            .get_or_fetch_with(
                CachePartition::Exercises,
                "list",
                &json!({ "limit": limit, "offset": offset }),
                move || async move { catalog.list_exercises(&query).await },
            )
            .await
    }

    /// Exercises for workout planning
    ///
    /// With a search term this delegates to [`Self::search`]; otherwise it
    /// fetches one large filtered page.
    ///
    /// # Errors
    ///
    /// Returns the upstream error if any request fails
    pub async fn workout_exercises(&self, filters: &ExerciseFilters) -> AppResult<Vec<Exercise>> {
        if let Some(term) = filters.search_term() {
            return self.search(term, &filters.without_search()).await;
        }

        let catalog = Arc::clone(&self.catalog);
        let filters = filters.without_search();
        let page = PageRequest::new(0, WORKOUT_LIST_PAGE_SIZE);
        let query = ExerciseQuery::page(page, filters.clone());
        self.cache
            .get_or_fetch_with(CachePartition::Exercises, "workout", &filters, move || {
                async move { Ok(catalog.list_exercises(&query).await?.results) }
            })
            .await
    }

    /// A single exercise
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or the upstream error
    pub async fn exercise(&self, id: u32) -> AppResult<Exercise> {
        let catalog = Arc::clone(&self.catalog);
        self.cache
            .get_or_fetch_with(CachePartition::Details, "exercise", &id, move || async move {
                catalog.get_exercise(id).await
            })
            .await
    }

    /// All exercise categories
    ///
    /// # Errors
    ///
    /// Returns the upstream error if the list cannot be fetched
    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        let catalog = Arc::clone(&self.catalog);
        self.cache
            .get_or_fetch_with(CachePartition::Categories, "all", &(), move || async move {
                catalog.list_categories().await
            })
            .await
    }

    /// All muscles
    ///
    /// # Errors
    ///
    /// Returns the upstream error if the list cannot be fetched
    pub async fn muscles(&self) -> AppResult<Vec<Muscle>> {
        let catalog = Arc::clone(&self.catalog);
        self.cache
            .get_or_fetch_with(CachePartition::Muscles, "all", &(), move || async move {
                catalog.list_muscles().await
            })
            .await
    }

    /// All equipment
    ///
    /// # Errors
    ///
    /// Returns the upstream error if the list cannot be fetched
    pub async fn equipment(&self) -> AppResult<Vec<Equipment>> {
        let catalog = Arc::clone(&self.catalog);
        self.cache
            .get_or_fetch_with(CachePartition::Equipment, "all", &(), move || async move {
                catalog.list_equipment().await
            })
            .await
    }

    /// Images attached to an exercise
    ///
    /// # Errors
    ///
    /// Returns the upstream error if the list cannot be fetched
    pub async fn images(&self, exercise_id: u32) -> AppResult<Vec<ExerciseImage>> {
        let catalog = Arc::clone(&self.catalog);
        self.cache
            .get_or_fetch_with(CachePartition::Images, "exercise", &exercise_id, move || {
                async move { catalog.list_images(exercise_id).await }
            })
            .await
    }

    /// Videos attached to an exercise
    ///
    /// # Errors
    ///
    /// Returns the upstream error if the list cannot be fetched
    pub async fn videos(&self, exercise_id: u32) -> AppResult<Vec<ExerciseVideo>> {
        let catalog = Arc::clone(&self.catalog);
        self.cache
            .get_or_fetch_with(CachePartition::Videos, "exercise", &exercise_id, move || {
                async move { catalog.list_videos(exercise_id).await }
            })
            .await
    }

    /// Search exercises by text within optional category, muscle, and
    /// equipment filters
    ///
    /// A blank `query` lists everything matching the filters, up to the
    /// search hard cap.
    ///
    /// # Errors
    ///
    /// Returns the first upstream error; failed searches are not cached
    pub async fn search(
        &self,
        query: &str,
        filters: &ExerciseFilters,
    ) -> AppResult<Vec<Exercise>> {
        let filters = match query.trim() {
            "" => filters.without_search(),
            term => filters.clone().with_search(term),
        };
        let catalog = Arc::clone(&self.catalog);
        let options = self.search_options;
        let search_filters = filters.clone();
        self.cache
            .get_or_fetch_with(CachePartition::Search, "search", &filters, move || async move {
                search_paginated(catalog.as_ref(), &search_filters, &options).await
            })
            .await
    }

    /// Drop every cached catalog response
    pub async fn clear_cache(&self) -> usize {
        AppLogger::log_cache_stats(&self.cache.stats().await);
        self.cache.invalidate(None).await
    }

    /// Drop cached responses in one partition, or all when `None`
    pub async fn invalidate(&self, partition: Option<CachePartition>) -> usize {
        self.cache.invalidate(partition).await
    }
}
