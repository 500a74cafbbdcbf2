// ABOUTME: Application constants organized by domain
// ABOUTME: Cache lifetimes, catalog pagination bounds, and nutrition energy densities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache TTL, capacity, and cleanup constants
pub mod cache;

/// Exercise catalog endpoint and pagination constants
pub mod catalog;

/// Nutrition and energy expenditure constants
pub mod nutrition;

/// Service identification used in structured logs
pub mod service_names {
    /// Name reported by the logging layer
    pub const PULSEFIT: &str = "pulsefit";
}
