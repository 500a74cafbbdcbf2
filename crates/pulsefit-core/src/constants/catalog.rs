// ABOUTME: Exercise catalog constants for endpoints, language filtering, and pagination
// ABOUTME: Bounds for multi-page search accumulation against the wger API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Base URL of the public wger exercise API
pub const WGER_API_BASE: &str = "https://wger.de/api/v2";

/// wger language identifier for English
pub const ENGLISH_LANGUAGE_ID: u32 = 2;

/// Page size used while accumulating search results
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Page size for the plain exercise listing
pub const DETAIL_LIST_PAGE_SIZE: u32 = 100;

/// Page size for unfiltered workout exercise listings (single request)
pub const WORKOUT_LIST_PAGE_SIZE: u32 = 1500;

/// Maximum number of raw records accumulated by a paginated search
pub const SEARCH_HARD_CAP: usize = 500;

/// Below this many matches a supplementary name query is issued
pub const SEARCH_MIN_RESULTS: usize = 50;

/// Category name used when the upstream record has none
pub const DEFAULT_CATEGORY_NAME: &str = "General";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
