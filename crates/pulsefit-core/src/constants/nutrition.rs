// ABOUTME: Physiological constants for nutrition and energy expenditure calculations
// ABOUTME: Macronutrient energy densities, MET oxygen cost, and daily hydration target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Energy density of protein (kcal per gram)
pub const PROTEIN_KCAL_PER_G: f64 = 4.0;

/// Energy density of carbohydrate (kcal per gram)
pub const CARBS_KCAL_PER_G: f64 = 4.0;

/// Energy density of fat (kcal per gram)
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Oxygen uptake of one MET in ml/kg/min
pub const MET_OXYGEN_ML_PER_KG_MIN: f64 = 3.5;

/// Divisor converting ml O2 x kg into kcal per minute
pub const MET_KCAL_DIVISOR: f64 = 200.0;

/// Default daily water intake target in millilitres
pub const DEFAULT_WATER_TARGET_ML: u32 = 2500;
