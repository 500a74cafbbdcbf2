// ABOUTME: Pagination-aware accumulation of catalog search results
// ABOUTME: Bounded page walk, id de-duplication, text filtering, and supplementary name queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Search Accumulation
//!
//! The catalog has no full-text search, so a search walks the filtered
//! exercise list page by page, then matches the search term client-side over
//! the whole accumulation. Filtering after accumulation keeps matching
//! independent of where page boundaries fall.

use super::{ExerciseCatalog, ExerciseQuery};
use crate::config::CatalogConfig;
use crate::constants::catalog::{DEFAULT_PAGE_SIZE, SEARCH_HARD_CAP, SEARCH_MIN_RESULTS};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, ExerciseFilters};
use crate::pagination::{OffsetPage, PageRequest};
use std::collections::HashSet;
use std::future::Future;
use tracing::debug;

/// Bounds for a paginated search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Records requested per page
    pub page_size: u32,
    /// Stop once this many records have been accumulated
    pub hard_cap: usize,
    /// Below this many text matches, issue a supplementary name query
    pub min_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            hard_cap: SEARCH_HARD_CAP,
            min_results: SEARCH_MIN_RESULTS,
        }
    }
}

impl From<&CatalogConfig> for SearchOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            page_size: config.page_size,
            hard_cap: config.search_hard_cap,
            min_results: config.search_min_results,
        }
    }
}

/// Fetch pages until the server has no more, a page is empty, or `hard_cap`
/// records have been collected
///
/// A page counts as empty only when the server sent no records at all. A page
/// whose records were all dropped during normalization does not end the walk.
///
/// The result is truncated to exactly `hard_cap` records when the cap is hit.
/// Any page error aborts the walk; partial accumulations are never returned.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero page size, otherwise the first error
/// returned by `page_fetcher`
pub async fn accumulate_pages<T, F, Fut>(
    mut page_fetcher: F,
    page_size: u32,
    hard_cap: usize,
) -> AppResult<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = AppResult<OffsetPage<T>>>,
{
    if page_size == 0 {
        return Err(AppError::invalid_input("page size must be greater than zero"));
    }

    let mut accumulated = Vec::new();
    let mut request = PageRequest::new(0, page_size);
    let mut pages = 0_u32;

    while accumulated.len() < hard_cap {
        let page = page_fetcher(request).await?;
        pages += 1;
        if page.received() == 0 {
            break;
        }

        let has_more = page.has_more();
        accumulated.extend(page.results);
        if !has_more {
            break;
        }
        request = request.next();
    }
    accumulated.truncate(hard_cap);

    debug!(
        pages,
        records = accumulated.len(),
        hard_cap,
        "Accumulated catalog pages"
    );
    Ok(accumulated)
}

/// Search the catalog for exercises matching `filters`
///
/// Category, muscle, and equipment filters are applied upstream. The search
/// term, if any, is matched case-insensitively against name, description,
/// and category after accumulation. Records are de-duplicated by id in server
/// order. When a term yields fewer than `options.min_results` matches, one
/// supplementary server-side name query is merged in, keeping the first copy
/// of any duplicate.
///
/// # Errors
///
/// Returns the first upstream error; no partial results are returned
pub async fn search_paginated<C>(
    catalog: &C,
    filters: &ExerciseFilters,
    options: &SearchOptions,
) -> AppResult<Vec<Exercise>>
where
    C: ExerciseCatalog + ?Sized,
{
    let base_filters = filters.without_search();

    let accumulated = accumulate_pages(
        |page| {
            let query = ExerciseQuery::page(page, base_filters.clone());
            async move { catalog.list_exercises(&query).await }
        },
        options.page_size,
        options.hard_cap,
    )
    .await?;

    let mut seen = HashSet::new();
    let mut results: Vec<Exercise> = accumulated
        .into_iter()
        .filter(|exercise| seen.insert(exercise.id))
        .collect();

    let Some(term) = filters.search_term() else {
        debug!(results = results.len(), "Catalog listing accumulated");
        return Ok(results);
    };

    let needle = term.to_lowercase();
    results.retain(|exercise| exercise.matches_text(&needle));
    let text_matches = results.len();

    if text_matches < options.min_results {
        let query = ExerciseQuery::page(PageRequest::new(0, options.page_size), base_filters)
            .with_name(term);
        let supplementary = catalog.list_exercises(&query).await?;

        let mut seen: HashSet<u32> = results.iter().map(|exercise| exercise.id).collect();
        results.extend(
            supplementary
                .results
                .into_iter()
                .filter(|exercise| seen.insert(exercise.id)),
        );
    }

    debug!(
        term,
        text_matches,
        results = results.len(),
        "Catalog search completed"
    );
    Ok(results)
}
