// ABOUTME: Configuration error types for metrics engine validation
// ABOUTME: Defines error variants for invalid ranges, ratios, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for metrics engine validation.

use crate::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., ratio not between 0 and 1)
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),

    /// Ratios don't sum to the required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Table entries are not ordered as required
    #[error("Invalid ordering: {0}")]
    InvalidOrdering(String),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
