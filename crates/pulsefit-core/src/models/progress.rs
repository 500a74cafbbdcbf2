// ABOUTME: Derived progress statistics, weekly summaries, and personal records
// ABOUTME: Outputs of session history aggregation for progress display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate statistics over a list of sessions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ProgressStats {
    /// Number of sessions
    pub total_workouts: usize,
    /// Sum of weight x reps over every set
    pub total_volume: f64,
    /// Sum of recorded calories burned
    pub total_calories: u64,
    /// Consecutive-day run ending at the most recent session day
    pub current_streak: u32,
    /// Longest consecutive-day run
    pub best_streak: u32,
    /// Distinct session days in the current calendar month
    pub workout_days_this_month: usize,
}

/// Totals for one Monday-based calendar week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Sum of weight x reps
    pub volume: f64,
    /// Sum of calories burned
    pub calories: u64,
    /// Number of sessions
    pub workouts: usize,
    /// Number of logged sets
    pub sets: usize,
    /// Display label ("Week 1", "Week 2", ...)
    pub label: String,
    /// Compact display label ("W1", "W2", ...)
    pub short_label: String,
}

/// Best recorded set for an exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalRecord {
    /// Catalog identifier of the exercise, when known
    pub exercise_id: Option<String>,
    /// Display name of the exercise
    pub exercise_name: String,
    /// Heaviest load lifted in kilograms
    pub max_weight_kg: f64,
    /// Repetitions performed at that load
    pub max_reps: u32,
    /// When the record was set
    pub achieved_at: DateTime<Utc>,
}

impl PersonalRecord {
    /// Whether a new set beats this record
    ///
    /// A heavier load always wins; at equal load more repetitions win.
    #[must_use]
    pub fn is_improved_by(&self, weight_kg: f64, reps: u32) -> bool {
        weight_kg > self.max_weight_kg
            || ((weight_kg - self.max_weight_kg).abs() < f64::EPSILON && reps > self.max_reps)
    }
}
