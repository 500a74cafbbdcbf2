// ABOUTME: User profile snapshot and the enums that drive nutrition calculations
// ABOUTME: Lenient parsing for activity, goal, and intensity; strict parsing for gender
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Biological sex used by the Mifflin-St Jeor offset
///
/// Only two values are accepted. Anything else is rejected as invalid input
/// instead of silently selecting one of the two offsets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male (+5 kcal offset)
    Male,
    /// Female (-161 kcal offset)
    Female,
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unsupported gender '{other}': expected 'male' or 'female'"
            ))
            .with_field("gender")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

/// Habitual activity level used for the TDEE multiplier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

impl ActivityLevel {
    /// All levels from least to most active
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    /// Parse a stored value, falling back to `Moderate` for unknown input
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|()| {
            warn!(activity_level = %value, "Unrecognized activity level, using moderate");
            Self::default()
        })
    }
}

impl FromStr for ActivityLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            _ => Err(()),
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

/// Body composition goal driving the calorie adjustment and macro split
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum NutritionGoal {
    /// 20% calorie deficit, higher protein share
    LoseWeight,
    /// 10% calorie surplus, higher carbohydrate share
    GainMuscle,
    /// Calories at TDEE
    #[default]
    Maintain,
}

impl NutritionGoal {
    /// Parse a stored value, falling back to `Maintain` for unknown input
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|()| {
            warn!(goal = %value, "Unrecognized nutrition goal, using maintain");
            Self::default()
        })
    }
}

impl FromStr for NutritionGoal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lose_weight" => Ok(Self::LoseWeight),
            "gain_muscle" => Ok(Self::GainMuscle),
            "maintain" => Ok(Self::Maintain),
            _ => Err(()),
        }
    }
}

impl From<String> for NutritionGoal {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

/// Perceived workout intensity for MET-based calorie estimates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum WorkoutIntensity {
    /// 3.5 MET
    Light,
    /// 5.0 MET
    #[default]
    Moderate,
    /// 8.0 MET
    Intense,
    /// 10.0 MET
    VeryIntense,
}

impl WorkoutIntensity {
    /// Parse a stored value, falling back to `Moderate` for unknown input
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|()| {
            warn!(intensity = %value, "Unrecognized workout intensity, using moderate");
            Self::default()
        })
    }
}

impl FromStr for WorkoutIntensity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "intense" => Ok(Self::Intense),
            "very_intense" => Ok(Self::VeryIntense),
            _ => Err(()),
        }
    }
}

impl From<String> for WorkoutIntensity {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

/// Per-user physical and goal attributes as read from the persistence service
///
/// Every field is optional because the backing row may be incomplete; the
/// nutrition calculator reports the first missing field it needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Body weight in kilograms
    #[serde(default, alias = "weight")]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(default, alias = "height")]
    pub height_cm: Option<f64>,
    /// Age in whole years
    #[serde(default)]
    pub age: Option<u32>,
    /// Gender for the BMR offset
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Habitual activity level
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// Nutrition goal
    #[serde(default)]
    pub goal: Option<NutritionGoal>,
    /// Previously computed BMR, used instead of the formula when positive
    #[serde(default)]
    pub bmr: Option<f64>,
}

impl Profile {
    /// Activity level, defaulting to moderate when unset
    #[must_use]
    pub fn activity_level_or_default(&self) -> ActivityLevel {
        self.activity_level.unwrap_or_default()
    }

    /// Goal, defaulting to maintain when unset
    #[must_use]
    pub fn goal_or_default(&self) -> NutritionGoal {
        self.goal.unwrap_or_default()
    }

    /// Precomputed BMR if present and usable
    #[must_use]
    pub fn precomputed_bmr(&self) -> Option<f64> {
        self.bmr.filter(|bmr| bmr.is_finite() && *bmr > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_activity_level_defaults_to_moderate() {
        assert_eq!(ActivityLevel::parse_or_default("couch"), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::parse_or_default("very_active"), ActivityLevel::VeryActive);
    }

    #[test]
    fn test_gender_is_strict() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        let error = "other".parse::<Gender>().unwrap_err();
        assert!(error.is_validation());
        assert_eq!(error.context.field.as_deref(), Some("gender"));
    }

    #[test]
    fn test_profile_deserializes_backend_row() {
        let profile: Profile = serde_json::from_str(
            r#"{"weight": 70.0, "height": 175.0, "age": 25, "gender": "male",
                "activity_level": "unknown_level", "goal": "gain_muscle", "bmr": null}"#,
        )
        .unwrap();
        assert_eq!(profile.weight_kg, Some(70.0));
        assert_eq!(profile.activity_level, Some(ActivityLevel::Moderate));
        assert_eq!(profile.goal, Some(NutritionGoal::GainMuscle));
        assert_eq!(profile.precomputed_bmr(), None);
    }
}
