// ABOUTME: Derived nutrition targets and food intake entries
// ABOUTME: Pure outputs of the metrics engine, recomputed on demand and never persisted here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Goal-adjusted calorie target with its macronutrient split
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MacroTargets {
    /// Goal-adjusted daily calories
    pub calories: u32,
    /// Daily protein in grams
    pub protein_g: u32,
    /// Daily carbohydrates in grams
    pub carbs_g: u32,
    /// Daily fat in grams
    pub fats_g: u32,
    /// Share of calories from protein
    pub protein_ratio: f64,
    /// Share of calories from carbohydrates
    pub carb_ratio: f64,
    /// Share of calories from fat
    pub fat_ratio: f64,
}

impl MacroTargets {
    /// Calories implied by the rounded gram targets
    #[must_use]
    pub fn gram_calories(&self) -> u32 {
        self.protein_g * 4 + self.carbs_g * 4 + self.fats_g * 9
    }
}

/// Complete daily nutrition targets for a profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NutritionTargets {
    /// Basal metabolic rate (kcal/day)
    pub bmr: u32,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: u32,
    /// Goal-adjusted daily calories
    pub calories: u32,
    /// Daily protein in grams
    pub protein_g: u32,
    /// Daily carbohydrates in grams
    pub carbs_g: u32,
    /// Daily fat in grams
    pub fats_g: u32,
    /// Share of calories from protein
    pub protein_ratio: f64,
    /// Share of calories from carbohydrates
    pub carb_ratio: f64,
    /// Share of calories from fat
    pub fat_ratio: f64,
}

impl NutritionTargets {
    /// Combine energy figures with a macro split
    #[must_use]
    pub const fn from_parts(bmr: u32, tdee: u32, macros: MacroTargets) -> Self {
        Self {
            bmr,
            tdee,
            calories: macros.calories,
            protein_g: macros.protein_g,
            carbs_g: macros.carbs_g,
            fats_g: macros.fats_g,
            protein_ratio: macros.protein_ratio,
            carb_ratio: macros.carb_ratio,
            fat_ratio: macros.fat_ratio,
        }
    }
}

/// A logged food item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    /// Food name
    pub name: String,
    /// Energy in kcal
    pub calories: u32,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs_g: f64,
    /// Fat in grams
    #[serde(default)]
    pub fats_g: f64,
}
