// ABOUTME: Per-day nutrition bookkeeping against computed targets
// ABOUTME: Tracks consumed food, burned calories, and water intake with capped progress ratios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::nutrition::DEFAULT_WATER_TARGET_ML;
use crate::models::{FoodEntry, NutritionTargets};
use crate::nutrition_calculator::percent_of_target;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of nutrition intake measured against the day's targets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyNutritionLog {
    /// Calendar day
    pub date: NaiveDate,
    /// Calorie target for the day
    pub target_calories: u32,
    /// Protein target in grams
    pub target_protein_g: u32,
    /// Carbohydrate target in grams
    pub target_carbs_g: u32,
    /// Fat target in grams
    pub target_fats_g: u32,
    /// Water target in millilitres
    pub target_water_ml: u32,
    /// Calories burned by workouts
    pub calories_burned: u32,
    /// Calories consumed
    pub calories_consumed: u32,
    /// Protein consumed in grams
    pub protein_consumed_g: f64,
    /// Carbohydrates consumed in grams
    pub carbs_consumed_g: f64,
    /// Fat consumed in grams
    pub fats_consumed_g: f64,
    /// Water consumed in millilitres
    pub water_intake_ml: u32,
}

impl DailyNutritionLog {
    /// Start an empty log seeded with the given targets
    #[must_use]
    pub const fn new(date: NaiveDate, targets: &NutritionTargets) -> Self {
        Self {
            date,
            target_calories: targets.calories,
            target_protein_g: targets.protein_g,
            target_carbs_g: targets.carbs_g,
            target_fats_g: targets.fats_g,
            target_water_ml: DEFAULT_WATER_TARGET_ML,
            calories_burned: 0,
            calories_consumed: 0,
            protein_consumed_g: 0.0,
            carbs_consumed_g: 0.0,
            fats_consumed_g: 0.0,
            water_intake_ml: 0,
        }
    }

    /// Add calories burned by a completed workout
    pub fn record_workout(&mut self, calories: u32) {
        self.calories_burned = self.calories_burned.saturating_add(calories);
    }

    /// Add a food entry's energy and macronutrients
    pub fn log_food(&mut self, entry: &FoodEntry) {
        self.calories_consumed = self.calories_consumed.saturating_add(entry.calories);
        self.protein_consumed_g += entry.protein_g;
        self.carbs_consumed_g += entry.carbs_g;
        self.fats_consumed_g += entry.fats_g;
    }

    /// Add water intake
    pub fn add_water(&mut self, ml: u32) {
        self.water_intake_ml = self.water_intake_ml.saturating_add(ml);
    }

    /// Consumed calories as a percentage of target, capped at 100
    #[must_use]
    pub fn calorie_progress(&self) -> f64 {
        percent_of_target(
            f64::from(self.calories_consumed),
            f64::from(self.target_calories),
        )
    }

    /// Water intake as a percentage of target, capped at 100
    #[must_use]
    pub fn water_progress(&self) -> f64 {
        percent_of_target(
            f64::from(self.water_intake_ml),
            f64::from(self.target_water_ml),
        )
    }

    /// Calories left for the day: target plus burned minus consumed
    ///
    /// Negative once intake exceeds the allowance.
    #[must_use]
    pub fn remaining_calories(&self) -> i64 {
        i64::from(self.target_calories) + i64::from(self.calories_burned)
            - i64::from(self.calories_consumed)
    }
}
