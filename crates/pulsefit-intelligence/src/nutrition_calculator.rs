// ABOUTME: Nutrition calculation algorithms using the Mifflin-St Jeor equation and activity factors
// ABOUTME: BMR, TDEE, goal-adjusted calorie targets, and gram-level macronutrient targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Converts a profile snapshot into daily energy and macronutrient targets.
//! Every intermediate figure is rounded to whole kilocalories the same way the
//! mobile app displays it, so targets computed here match what users see.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). *Exercise Physiology*.

use crate::config::{ActivityFactorsConfig, BmrConfig, GoalAdjustmentsConfig, NutritionConfig};
use crate::constants::nutrition::{CARBS_KCAL_PER_G, FAT_KCAL_PER_G, PROTEIN_KCAL_PER_G};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActivityLevel, Gender, MacroTargets, NutritionGoal, NutritionTargets, Profile,
};
use tracing::debug;

/// Round a non-negative energy or mass figure to a whole number
#[inline]
// Safe: callers only pass validated, non-negative values well inside u32 range
fn round_to_u32(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

fn require_positive(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::out_of_range(
            field,
            format!("{field} must be a positive number, got {value}"),
        ))
    }
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// The result is rounded to the nearest whole kilocalorie.
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns a validation error if weight, height, or age is not positive, or if
/// the inputs produce a non-positive BMR
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> AppResult<f64> {
    require_positive("weight_kg", weight_kg)?;
    require_positive("height_cm", height_cm)?;
    if age == 0 {
        return Err(AppError::out_of_range("age", "age must be at least 1 year"));
    }

    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };

    let bmr = config.msj_age_coef.mul_add(
        f64::from(age),
        config
            .msj_weight_coef
            .mul_add(weight_kg, config.msj_height_coef * height_cm),
    ) + gender_constant;

    if bmr <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "Profile values produce a non-positive BMR ({bmr:.0} kcal)"
        )));
    }

    Ok(bmr.round())
}

/// Calculate Total Daily Energy Expenditure (TDEE)
///
/// Formula: TDEE = round(BMR x Activity Factor)
///
/// Activity factors:
/// - Sedentary: 1.2
/// - Light: 1.375
/// - Moderate: 1.55
/// - Active: 1.725
/// - Very active: 1.9
///
/// # Errors
///
/// Returns a validation error if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> AppResult<u32> {
    require_positive("bmr", bmr)?;
    Ok(round_to_u32(bmr * config.factor_for(activity_level)))
}

/// Calculate the goal-adjusted calorie target and its macronutrient split
///
/// The goal's calorie multiplier is applied first (0.8 for weight loss, 1.1
/// for muscle gain, 1.0 for maintenance) and the macro ratios are applied to
/// the adjusted figure. Grams use 4 kcal/g for protein and carbohydrate and
/// 9 kcal/g for fat.
#[must_use]
pub fn calculate_macros(
    tdee: u32,
    goal: NutritionGoal,
    config: &GoalAdjustmentsConfig,
) -> MacroTargets {
    let split = config.split_for(goal);
    let calories = round_to_u32(f64::from(tdee) * split.calorie_multiplier);
    let calories_f = f64::from(calories);

    MacroTargets {
        calories,
        protein_g: round_to_u32(calories_f * split.protein_ratio / PROTEIN_KCAL_PER_G),
        carbs_g: round_to_u32(calories_f * split.carb_ratio / CARBS_KCAL_PER_G),
        fats_g: round_to_u32(calories_f * split.fat_ratio / FAT_KCAL_PER_G),
        protein_ratio: split.protein_ratio,
        carb_ratio: split.carb_ratio,
        fat_ratio: split.fat_ratio,
    }
}

/// Calculate complete daily nutrition targets for a profile snapshot
///
/// A positive precomputed BMR on the profile is used as-is; otherwise weight,
/// height, age, and gender are required. Missing activity level defaults to
/// moderate and missing goal to maintain.
///
/// # Errors
///
/// Returns `MissingRequiredField` naming the first absent field needed for the
/// BMR, or a range error for a non-positive value
pub fn calculate_nutrition_targets(
    profile: &Profile,
    config: &NutritionConfig,
) -> AppResult<NutritionTargets> {
    let bmr = match profile.precomputed_bmr() {
        Some(bmr) => bmr.round(),
        None => {
            let weight_kg = profile
                .weight_kg
                .ok_or_else(|| AppError::missing_field("weight_kg"))?;
            let height_cm = profile
                .height_cm
                .ok_or_else(|| AppError::missing_field("height_cm"))?;
            let age = profile.age.ok_or_else(|| AppError::missing_field("age"))?;
            let gender = profile
                .gender
                .ok_or_else(|| AppError::missing_field("gender"))?;
            calculate_bmr(weight_kg, height_cm, age, gender, &config.bmr)?
        }
    };

    let activity_level = profile.activity_level_or_default();
    let goal = profile.goal_or_default();
    let tdee = calculate_tdee(bmr, activity_level, &config.activity_factors)?;
    let macros = calculate_macros(tdee, goal, &config.goals);

    debug!(
        bmr,
        tdee,
        calories = macros.calories,
        ?activity_level,
        ?goal,
        "Calculated nutrition targets"
    );

    Ok(NutritionTargets::from_parts(round_to_u32(bmr), tdee, macros))
}

/// Percentage of a target reached, capped at 100
///
/// Returns 0 when the target is zero, negative, or not finite so progress
/// displays stay total.
#[must_use]
pub fn percent_of_target(consumed: f64, target: f64) -> f64 {
    if !target.is_finite() || target <= 0.0 {
        return 0.0;
    }
    let percentage = consumed / target * 100.0;
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_u32_rounds_half_up() {
        assert_eq!(round_to_u32(183.5), 184);
        assert_eq!(round_to_u32(183.49), 183);
    }

    #[test]
    fn test_percent_of_target_guards_zero() {
        assert!(percent_of_target(500.0, 0.0).abs() < f64::EPSILON);
        assert!((percent_of_target(1500.0, 1000.0) - 100.0).abs() < f64::EPSILON);
        assert!((percent_of_target(250.0, 1000.0) - 25.0).abs() < f64::EPSILON);
    }
}
