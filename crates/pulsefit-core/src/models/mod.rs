// ABOUTME: Core data models shared by the metrics engine and the catalog cache
// ABOUTME: Profile snapshots, workout history, nutrition targets, progress, and catalog entities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise catalog entities and query filters
pub mod catalog;
/// Nutrition targets and daily intake records
pub mod nutrition;
/// User physical attributes and goal enums
pub mod profile;
/// Derived progress statistics and personal records
pub mod progress;
/// Workout sessions and their logged sets
pub mod workout;

pub use catalog::{
    Category, Equipment, Exercise, ExerciseFilters, ExerciseImage, ExerciseVideo, Muscle,
};
pub use nutrition::{FoodEntry, MacroTargets, NutritionTargets};
pub use profile::{ActivityLevel, Gender, NutritionGoal, Profile, WorkoutIntensity};
pub use progress::{PersonalRecord, ProgressStats, WeeklySummary};
pub use workout::{ExerciseSet, WorkoutSession};
