// ABOUTME: Fitness metrics engine converting profiles and session history into targets and summaries
// ABOUTME: BMR, TDEE, macro split, MET calorie burn, streaks, volume, and weekly grouping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pulsefit Intelligence
//!
//! Every function in this crate is pure and synchronous: given the same
//! profile snapshot and session list it returns the same result, and it never
//! performs I/O. Invalid input is reported as an [`AppError`] with a
//! validation code rather than being defaulted away.

// Re-export pulsefit-core modules so calculators can keep `use crate::errors::*` etc.
pub use pulsefit_core::constants;
pub use pulsefit_core::errors;
pub use pulsefit_core::models;

/// Coefficients and ratios for every calculation, with validation
pub mod config;

/// MET-based workout calorie estimates
pub mod calorie_burn;
/// Exercise type classification and muscle group mapping
pub mod classification;
/// Daily nutrition log bookkeeping
pub mod daily_log;
/// BMR, TDEE, and macronutrient targets
pub mod nutrition_calculator;
/// Volume, streak, weekly, and personal record aggregation
pub mod progress;

pub use calorie_burn::calculate_workout_calories;
pub use classification::{classify_exercise, map_muscles_to_groups, ExerciseType, MuscleGroup};
pub use config::{ConfigError, NutritionConfig};
pub use daily_log::DailyNutritionLog;
pub use nutrition_calculator::{
    calculate_bmr, calculate_macros, calculate_nutrition_targets, calculate_tdee,
    percent_of_target,
};
pub use progress::{
    aggregate_progress, best_sets_by_exercise, group_by_week, sessions_in_period,
    ProgressPeriod,
};
