// ABOUTME: MET-based calorie burn estimation for completed workout sessions
// ABOUTME: kcal/min = MET x 3.5 x weight / 200, scaled by session duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout calorie estimates
//!
//! Uses the standard ACSM conversion from oxygen uptake to energy: one MET
//! corresponds to 3.5 ml O2/kg/min, and dividing by 200 yields kcal/min.
//!
//! # Reference
//!
//! Ainsworth, B.E., et al. (2011). 2011 Compendium of Physical Activities.
//! *Medicine & Science in Sports & Exercise*, 43(8), 1575-1581.

use crate::config::MetValuesConfig;
use crate::constants::nutrition::{MET_KCAL_DIVISOR, MET_OXYGEN_ML_PER_KG_MIN};
use crate::errors::{AppError, AppResult};
use crate::models::WorkoutIntensity;

/// Estimate calories burned during a workout
///
/// Formula: round(MET x 3.5 x `weight_kg` / 200 x `duration_minutes`)
///
/// A zero-minute session burns zero calories.
///
/// # Errors
///
/// Returns a validation error if weight is not positive or duration is
/// negative or not finite
pub fn calculate_workout_calories(
    weight_kg: f64,
    duration_minutes: f64,
    intensity: WorkoutIntensity,
    config: &MetValuesConfig,
) -> AppResult<u32> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::out_of_range(
            "weight_kg",
            format!("weight_kg must be a positive number, got {weight_kg}"),
        ));
    }
    if !duration_minutes.is_finite() || duration_minutes < 0.0 {
        return Err(AppError::out_of_range(
            "duration_minutes",
            format!("duration_minutes must not be negative, got {duration_minutes}"),
        ));
    }

    let met = config.met_for(intensity);
    let kcal_per_minute = met * MET_OXYGEN_ML_PER_KG_MIN * weight_kg / MET_KCAL_DIVISOR;

    // Safe: inputs validated non-negative and finite
    let calories = (kcal_per_minute * duration_minutes).round() as u32;
    Ok(calories)
}
