// ABOUTME: Integration tests for multi-page catalog search accumulation
// ABOUTME: Tests page walking, hard cap, text filtering, supplementary queries, and errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{exercise, numbered_exercises, ScriptedCatalog};
use pulsefit::catalog::{accumulate_pages, search_paginated, SearchOptions};
use pulsefit::errors::{AppResult, ErrorCode};
use pulsefit::models::{Exercise, ExerciseFilters};
use pulsefit::pagination::OffsetPage;

const fn options(page_size: u32, hard_cap: usize, min_results: usize) -> SearchOptions {
    SearchOptions {
        page_size,
        hard_cap,
        min_results,
    }
}

fn ids(exercises: &[Exercise]) -> Vec<u32> {
    exercises.iter().map(|exercise| exercise.id).collect()
}

#[tokio::test]
async fn test_walks_all_pages_in_server_order() -> Result<()> {
    common::init_test_logging();
    let catalog = ScriptedCatalog::with_exercises(numbered_exercises(300));

    let results =
        search_paginated(&catalog, &ExerciseFilters::default(), &options(100, 500, 50)).await?;

    assert_eq!(results.len(), 300);
    assert_eq!(ids(&results), (1..=300).collect::<Vec<_>>());
    assert_eq!(catalog.list_calls(), 3);
    assert_eq!(catalog.name_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_hard_cap_truncates_endless_catalog() -> Result<()> {
    let catalog = ScriptedCatalog::endless();

    let results =
        search_paginated(&catalog, &ExerciseFilters::default(), &options(200, 500, 50)).await?;

    assert_eq!(results.len(), 500);
    assert_eq!(results.last().map(|e| e.id), Some(500));
    assert_eq!(catalog.list_calls(), 3);
    Ok(())
}

#[tokio::test]
async fn test_text_filter_runs_over_whole_accumulation() -> Result<()> {
    let mut exercises = numbered_exercises(250);
    exercises[10].name = "Front Squat".to_owned();
    exercises[120].description = "A deep squat with a pause".to_owned();
    exercises[240].name = "SQUAT jump".to_owned();
    let catalog = ScriptedCatalog::with_exercises(exercises);

    let filters = ExerciseFilters::default().with_search("  Squat ");
    let results = search_paginated(&catalog, &filters, &options(100, 500, 3)).await?;

    assert_eq!(ids(&results), vec![11, 121, 241]);
    assert_eq!(catalog.name_calls(), 0, "enough matches, no supplementary query");
    Ok(())
}

#[tokio::test]
async fn test_sparse_matches_merge_supplementary_name_query() -> Result<()> {
    let mut exercises = numbered_exercises(40);
    exercises[4].name = "Bench press".to_owned();
    exercises[9].name = "Incline bench press".to_owned();
    let catalog = ScriptedCatalog::with_exercises(exercises).with_name_matches(vec![
        exercise(10, "Incline bench press (duplicate)"),
        exercise(900, "Bench dip"),
        exercise(5, "Bench press (duplicate)"),
        exercise(901, "Close-grip bench"),
    ]);

    let filters = ExerciseFilters::by_category(11).with_search("bench");
    let results = search_paginated(&catalog, &filters, &options(100, 500, 50)).await?;

    assert_eq!(ids(&results), vec![5, 10, 900, 901]);
    assert_eq!(results[1].name, "Incline bench press", "first copy wins");
    assert_eq!(catalog.name_calls(), 1);

    let supplementary = catalog
        .recorded_queries()
        .into_iter()
        .find(|query| query.name.is_some())
        .expect("supplementary query recorded");
    assert_eq!(supplementary.name.as_deref(), Some("bench"));
    assert_eq!(supplementary.offset, 0);
    assert_eq!(supplementary.filters.category, Some(11));
    assert_eq!(supplementary.filters.search, None);
    Ok(())
}

#[tokio::test]
async fn test_upstream_filters_exclude_search_term() -> Result<()> {
    let catalog = ScriptedCatalog::with_exercises(numbered_exercises(5));
    let filters = ExerciseFilters::by_category(8)
        .with_muscle(4)
        .with_search("exercise");

    search_paginated(&catalog, &filters, &options(100, 500, 1)).await?;

    for query in catalog.recorded_queries() {
        assert_eq!(query.filters.search, None);
        assert_eq!(query.filters.category, Some(8));
        assert_eq!(query.filters.muscle, Some(4));
    }
    Ok(())
}

#[tokio::test]
async fn test_duplicate_ids_across_pages_keep_first() -> Result<()> {
    let mut exercises = numbered_exercises(4);
    exercises.push(exercise(2, "Exercise 2 again"));
    exercises.push(exercise(5, "Exercise 5"));
    let catalog = ScriptedCatalog::with_exercises(exercises);

    let results =
        search_paginated(&catalog, &ExerciseFilters::default(), &options(3, 500, 0)).await?;

    assert_eq!(ids(&results), vec![1, 2, 3, 4, 5]);
    assert_eq!(results[1].name, "Exercise 2");
    Ok(())
}

#[tokio::test]
async fn test_page_failure_aborts_without_partial_results() {
    let catalog = ScriptedCatalog::with_exercises(numbered_exercises(300)).failing_at_offset(100);

    let error = search_paginated(&catalog, &ExerciseFilters::default(), &options(100, 500, 0))
        .await
        .expect_err("second page failure must propagate");

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(catalog.list_calls(), 2);
}

#[tokio::test]
async fn test_supplementary_failure_propagates() {
    let catalog = ScriptedCatalog::with_exercises(numbered_exercises(3)).failing_name_query();
    let filters = ExerciseFilters::default().with_search("deadlift");

    let error = search_paginated(&catalog, &filters, &options(100, 500, 10))
        .await
        .expect_err("name query failure must propagate");

    assert!(error.is_upstream());
    assert_eq!(catalog.list_calls(), 1);
    assert_eq!(catalog.name_calls(), 1);
}

#[tokio::test]
async fn test_accumulate_stops_on_empty_page() -> Result<()> {
    let pages: AppResult<Vec<u32>> = accumulate_pages(
        |request| async move {
            let results = if request.offset == 0 { vec![1, 2] } else { Vec::new() };
            Ok(OffsetPage::new(results, 10, Some("more".to_owned())))
        },
        2,
        100,
    )
    .await;

    assert_eq!(pages?, vec![1, 2]);
    Ok(())
}

#[tokio::test]
async fn test_accumulate_continues_past_fully_dropped_page() -> Result<()> {
    let pages: AppResult<Vec<u32>> = accumulate_pages(
        |request| async move {
            Ok(match request.offset {
                // Server sent one record that normalization dropped
                0 => OffsetPage {
                    skipped: 1,
                    ..OffsetPage::new(Vec::new(), 3, Some("more".to_owned()))
                },
                _ => OffsetPage::new(vec![2, 3], 3, None),
            })
        },
        1,
        100,
    )
    .await;

    assert_eq!(pages?, vec![2, 3]);
    Ok(())
}

#[tokio::test]
async fn test_accumulate_rejects_zero_page_size() {
    let result: AppResult<Vec<u32>> =
        accumulate_pages(|_| async { Ok(OffsetPage::default()) }, 0, 10).await;

    let error = result.expect_err("zero page size is invalid");
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
