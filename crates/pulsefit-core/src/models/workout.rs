// ABOUTME: Historical workout session records and the sets logged within them
// ABOUTME: Read-only inputs to progress aggregation, owned by the persistence service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    /// Catalog identifier of the exercise, when known
    #[serde(default)]
    pub exercise_id: Option<String>,
    /// Display name of the exercise
    pub exercise_name: String,
    /// Load in kilograms (0 for bodyweight work)
    #[serde(alias = "weight")]
    pub weight_kg: f64,
    /// Completed repetitions
    pub reps: u32,
}

impl ExerciseSet {
    /// Create a set without a catalog identifier
    #[must_use]
    pub fn new(exercise_name: impl Into<String>, weight_kg: f64, reps: u32) -> Self {
        Self {
            exercise_id: None,
            exercise_name: exercise_name.into(),
            weight_kg,
            reps,
        }
    }

    /// Training volume of this set (weight x reps)
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.weight_kg * f64::from(self.reps)
    }
}

/// Historical workout session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    /// Session identifier
    pub id: Uuid,
    /// Calendar day the session counts toward
    pub date: NaiveDate,
    /// When the session was started
    pub started_at: DateTime<Utc>,
    /// When the session was completed, `None` while in progress
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Sets logged during the session
    #[serde(default)]
    pub exercise_sets: Vec<ExerciseSet>,
    /// Calories burned, recorded on completion
    #[serde(default)]
    pub total_calories_burned: Option<u32>,
}

impl WorkoutSession {
    /// Sum of weight x reps across all sets
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.exercise_sets.iter().map(ExerciseSet::volume).sum()
    }

    /// Number of logged sets
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.exercise_sets.len()
    }

    /// Calories burned, treating an unrecorded value as zero
    #[must_use]
    pub fn calories(&self) -> u32 {
        self.total_calories_burned.unwrap_or(0)
    }

    /// Whether the session has been completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whole minutes between start and completion
    #[must_use]
    pub fn duration_minutes(&self) -> Option<i64> {
        self.completed_at
            .map(|completed| (completed - self.started_at).num_minutes().max(0))
    }
}
