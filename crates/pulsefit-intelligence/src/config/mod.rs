// ABOUTME: Configuration module for the metrics engine
// ABOUTME: Re-exports nutrition configuration and its error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration error types
pub mod error;
/// BMR, activity, goal, and MET coefficients
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentsConfig, GoalSplit, MetValuesConfig,
    NutritionConfig,
};
