// ABOUTME: Core types and constants for the pulsefit fitness metrics engine
// ABOUTME: Foundation crate with error handling, offset pagination, models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pulsefit Core
//!
//! Foundation crate providing shared types and constants for the pulsefit
//! metrics engine and exercise catalog cache. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Cache, catalog, and nutrition constants
//! - **pagination**: Offset-based pages as returned by the exercise catalog
//! - **models**: Profile, workout session, nutrition, and catalog entity types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Offset-based pagination for catalog list responses
pub mod pagination;

/// Core data models (Profile, `WorkoutSession`, `NutritionTargets`, Exercise, etc.)
pub mod models;
