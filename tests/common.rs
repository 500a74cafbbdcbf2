// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, fixture builders, and a scripted exercise catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pulsefit`

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use pulsefit::cache::{CacheConfig, RemoteCache};
use pulsefit::catalog::{ExerciseCatalog, ExerciseQuery};
use pulsefit::errors::{AppError, AppResult};
use pulsefit::models::{
    Category, Equipment, Exercise, ExerciseImage, ExerciseSet, ExerciseVideo, Muscle,
    WorkoutSession,
};
use pulsefit::pagination::OffsetPage;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Cache without the background task so tests control expiry explicitly
pub fn test_cache(ttl: Duration) -> RemoteCache {
    RemoteCache::new(&CacheConfig {
        ttl,
        max_entries: 1000,
        cleanup_interval: Duration::from_secs(300),
        enable_background_cleanup: false,
    })
}

pub fn exercise(id: u32, name: &str) -> Exercise {
    Exercise {
        id,
        uuid: None,
        name: name.to_owned(),
        description: String::new(),
        category: "Strength".to_owned(),
        category_id: Some(10),
        muscles: Vec::new(),
        muscles_secondary: Vec::new(),
        equipment: Vec::new(),
        variations: Vec::new(),
        license: None,
        license_author: None,
        images: Vec::new(),
        videos: Vec::new(),
    }
}

/// Exercises numbered `1..=count` named "Exercise N"
pub fn numbered_exercises(count: u32) -> Vec<Exercise> {
    (1..=count)
        .map(|id| exercise(id, &format!("Exercise {id}")))
        .collect()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Completed session on `day` with the given sets
pub fn session(day: NaiveDate, sets: Vec<ExerciseSet>, calories: Option<u32>) -> WorkoutSession {
    let started_at = Utc.from_utc_datetime(&day.and_hms_opt(18, 0, 0).unwrap());
    WorkoutSession {
        id: Uuid::new_v4(),
        date: day,
        started_at,
        completed_at: Some(started_at + chrono::Duration::minutes(45)),
        exercise_sets: sets,
        total_calories_burned: calories,
    }
}

/// Scripted in-memory catalog
///
/// Exercise listings page over `exercises`; `with_name` queries answer from
/// `name_matches`. Clones share call counters so a test can keep a handle
/// after moving the catalog into a service.
#[derive(Clone, Default)]
pub struct ScriptedCatalog {
    exercises: Arc<Vec<Exercise>>,
    name_matches: Arc<Vec<Exercise>>,
    endless: bool,
    fail_at_offset: Option<u32>,
    name_query_fails: bool,
    latency: Option<Duration>,
    failures_remaining: Arc<AtomicUsize>,
    categories_fail: Arc<AtomicBool>,
    pub list_calls: Arc<AtomicUsize>,
    pub name_calls: Arc<AtomicUsize>,
    pub detail_calls: Arc<AtomicUsize>,
    pub category_calls: Arc<AtomicUsize>,
    pub queries: Arc<Mutex<Vec<ExerciseQuery>>>,
}

impl ScriptedCatalog {
    pub fn with_exercises(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises: Arc::new(exercises),
            ..Self::default()
        }
    }

    /// Every page is full and reports a next page
    pub fn endless() -> Self {
        Self {
            endless: true,
            ..Self::default()
        }
    }

    pub fn with_name_matches(mut self, matches: Vec<Exercise>) -> Self {
        self.name_matches = Arc::new(matches);
        self
    }

    pub const fn failing_at_offset(mut self, offset: u32) -> Self {
        self.fail_at_offset = Some(offset);
        self
    }

    pub const fn failing_name_query(mut self) -> Self {
        self.name_query_fails = true;
        self
    }

    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The next `count` calls to any operation fail with an upstream error
    pub fn fail_next(&self, count: usize) {
        self.failures_remaining.store(count, Ordering::SeqCst);
    }

    pub fn fail_categories(&self, fail: bool) {
        self.categories_fail.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn name_calls(&self) -> usize {
        self.name_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_queries(&self) -> Vec<ExerciseQuery> {
        self.queries.lock().unwrap().clone()
    }

    async fn simulate(&self) -> AppResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let failing = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::external_unavailable("scripted", "scripted outage"));
        }
        Ok(())
    }

    fn page(&self, query: &ExerciseQuery) -> OffsetPage<Exercise> {
        let offset = query.offset as usize;
        let limit = query.limit as usize;

        if self.endless {
            let results = (0..limit)
                .map(|i| {
                    let id = (offset + i + 1) as u32;
                    exercise(id, &format!("Exercise {id}"))
                })
                .collect();
            return OffsetPage::new(results, u64::MAX, Some("more".to_owned()));
        }

        let total = self.exercises.len();
        let end = (offset + limit).min(total);
        let results = self.exercises.get(offset..end).unwrap_or_default().to_vec();
        let next = (end < total).then(|| format!("?offset={end}"));
        OffsetPage::new(results, total as u64, next)
    }
}

#[async_trait]
impl ExerciseCatalog for ScriptedCatalog {
    async fn list_exercises(&self, query: &ExerciseQuery) -> AppResult<OffsetPage<Exercise>> {
        self.queries.lock().unwrap().push(query.clone());
        if query.name.is_some() {
            self.name_calls.fetch_add(1, Ordering::SeqCst);
            self.simulate().await?;
            if self.name_query_fails {
                return Err(AppError::external_rate_limited("scripted"));
            }
            return Ok(OffsetPage::single(self.name_matches.as_ref().clone()));
        }

        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        if self.fail_at_offset == Some(query.offset) {
            return Err(AppError::external_service("scripted", "page failed"));
        }
        Ok(self.page(query))
    }

    async fn get_exercise(&self, id: u32) -> AppResult<Exercise> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        self.exercises
            .iter()
            .find(|exercise| exercise.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("exercise {id}")))
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        if self.categories_fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service("scripted", "categories failed"));
        }
        Ok(vec![
            Category {
                id: 10,
                name: "Abs".to_owned(),
            },
            Category {
                id: 11,
                name: "Chest".to_owned(),
            },
        ])
    }

    async fn list_muscles(&self) -> AppResult<Vec<Muscle>> {
        self.simulate().await?;
        Ok(vec![Muscle {
            id: 4,
            name: "Pectoralis major".to_owned(),
            name_en: "Chest".to_owned(),
            is_front: true,
        }])
    }

    async fn list_equipment(&self) -> AppResult<Vec<Equipment>> {
        self.simulate().await?;
        Ok(vec![Equipment {
            id: 1,
            name: "Barbell".to_owned(),
        }])
    }

    async fn list_images(&self, exercise_id: u32) -> AppResult<Vec<ExerciseImage>> {
        self.simulate().await?;
        Ok(vec![ExerciseImage {
            id: exercise_id * 10,
            image: format!("https://images.example/{exercise_id}.png"),
            is_main: true,
            license: None,
            license_author: None,
        }])
    }

    async fn list_videos(&self, _exercise_id: u32) -> AppResult<Vec<ExerciseVideo>> {
        self.simulate().await?;
        Ok(Vec::new())
    }
}
