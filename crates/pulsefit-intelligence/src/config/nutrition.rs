// ABOUTME: Nutrition configuration for BMR, TDEE, goal-based macro splits, and MET values
// ABOUTME: Defaults reproduce the mobile app's tables; validate() guards hand-edited overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculation Configuration
//!
//! Every coefficient used by the calculators is a named field so deployments
//! can override it without touching the formulas.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology
//! - MET values: Ainsworth et al. (2011) Compendium of Physical Activities

use super::error::ConfigError;
use crate::models::{ActivityLevel, NutritionGoal, WorkoutIntensity};
use serde::{Deserialize, Serialize};

/// Tolerance when checking that ratios sum to one
const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// Nutrition calculation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) formula coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie adjustment and macro split per goal
    pub goals: GoalAdjustmentsConfig,
    /// MET values per workout intensity
    pub met_values: MetValuesConfig,
}

impl NutritionConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` reported by a section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bmr.validate()?;
        self.activity_factors.validate()?;
        self.goals.validate()?;
        self.met_values.validate()
    }
}

/// Mifflin-St Jeor coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl BmrConfig {
    /// Validate that coefficients are finite and signed as the formula expects
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a non-finite or wrongly signed coefficient
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            ("msj_weight_coef", self.msj_weight_coef),
            ("msj_height_coef", self.msj_height_coef),
            ("msj_age_coef", self.msj_age_coef),
            ("msj_male_constant", self.msj_male_constant),
            ("msj_female_constant", self.msj_female_constant),
        ];
        if let Some((name, _)) = coefficients.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{name} must be finite"
            )));
        }
        if self.msj_weight_coef <= 0.0 || self.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "weight and height coefficients must be positive".to_owned(),
            ));
        }
        if self.msj_age_coef >= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "age coefficient must be negative".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Light (1-3 days/week): 1.375
    pub light: f64,
    /// Moderate (3-5 days/week): 1.55
    pub moderate: f64,
    /// Active (6-7 days/week): 1.725
    pub active: f64,
    /// Very active (hard training or physical job): 1.9
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }

    /// Validate that multipliers are at least 1.0 and strictly increasing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` or `ConfigError::InvalidOrdering`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = ActivityLevel::ALL.map(|level| self.factor_for(level));
        if factors.iter().any(|factor| !factor.is_finite() || *factor < 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "activity factors must be finite and at least 1.0".to_owned(),
            ));
        }
        if factors.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidOrdering(
                "activity factors must increase from sedentary to very_active".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Calorie multiplier and macro ratios for one goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalSplit {
    /// Applied to TDEE to get the calorie target
    pub calorie_multiplier: f64,
    /// Share of calories from protein
    pub protein_ratio: f64,
    /// Share of calories from carbohydrates
    pub carb_ratio: f64,
    /// Share of calories from fat
    pub fat_ratio: f64,
}

impl GoalSplit {
    /// Create a split
    #[must_use]
    pub const fn new(
        calorie_multiplier: f64,
        protein_ratio: f64,
        carb_ratio: f64,
        fat_ratio: f64,
    ) -> Self {
        Self {
            calorie_multiplier,
            protein_ratio,
            carb_ratio,
            fat_ratio,
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !self.calorie_multiplier.is_finite() || self.calorie_multiplier <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{name} calorie multiplier must be positive, got {}",
                self.calorie_multiplier
            )));
        }
        let ratios = [self.protein_ratio, self.carb_ratio, self.fat_ratio];
        if ratios.iter().any(|ratio| !(0.0..=1.0).contains(ratio)) {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{name} macro ratios must be between 0.0 and 1.0"
            )));
        }
        let sum: f64 = ratios.iter().sum();
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "{name} macro ratios must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Goal-specific calorie adjustment and macro split
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalAdjustmentsConfig {
    /// 20% deficit, 35/40/25 split
    pub lose_weight: GoalSplit,
    /// 10% surplus, 30/50/20 split
    pub gain_muscle: GoalSplit,
    /// No adjustment, 30/45/25 split
    pub maintain: GoalSplit,
}

impl Default for GoalAdjustmentsConfig {
    fn default() -> Self {
        Self {
            lose_weight: GoalSplit::new(0.8, 0.35, 0.40, 0.25),
            gain_muscle: GoalSplit::new(1.1, 0.30, 0.50, 0.20),
            maintain: GoalSplit::new(1.0, 0.30, 0.45, 0.25),
        }
    }
}

impl GoalAdjustmentsConfig {
    /// Split for a goal
    #[must_use]
    pub const fn split_for(&self, goal: NutritionGoal) -> GoalSplit {
        match goal {
            NutritionGoal::LoseWeight => self.lose_weight,
            NutritionGoal::GainMuscle => self.gain_muscle,
            NutritionGoal::Maintain => self.maintain,
        }
    }

    /// Validate every goal's split
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeights` if a split's ratios do not sum to one,
    /// or `ConfigError::ValueOutOfRange` for a non-positive multiplier
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lose_weight.validate("lose_weight")?;
        self.gain_muscle.validate("gain_muscle")?;
        self.maintain.validate("maintain")
    }
}

/// MET values per workout intensity
///
/// Reference: Ainsworth, B.E., et al. (2011). Compendium of Physical Activities.
/// Medicine & Science in Sports & Exercise, 43(8), 1575-1581.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetValuesConfig {
    /// Light effort: 3.5
    pub light: f64,
    /// Moderate effort: 5.0
    pub moderate: f64,
    /// Intense effort: 8.0
    pub intense: f64,
    /// Very intense effort: 10.0
    pub very_intense: f64,
}

impl Default for MetValuesConfig {
    fn default() -> Self {
        Self {
            light: 3.5,
            moderate: 5.0,
            intense: 8.0,
            very_intense: 10.0,
        }
    }
}

impl MetValuesConfig {
    /// MET value for an intensity
    #[must_use]
    pub const fn met_for(&self, intensity: WorkoutIntensity) -> f64 {
        match intensity {
            WorkoutIntensity::Light => self.light,
            WorkoutIntensity::Moderate => self.moderate,
            WorkoutIntensity::Intense => self.intense,
            WorkoutIntensity::VeryIntense => self.very_intense,
        }
    }

    /// Validate that MET values are positive
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a non-positive value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [self.light, self.moderate, self.intense, self.very_intense];
        if values.iter().any(|met| !met.is_finite() || *met <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "MET values must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
