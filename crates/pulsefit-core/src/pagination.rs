// ABOUTME: Offset-based pagination module for catalog list responses
// ABOUTME: Models the count/next/previous envelope returned by paginated REST endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// One page of a paginated list response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OffsetPage<T> {
    /// The items in this page
    pub results: Vec<T>,

    /// Total number of items available upstream
    pub count: u64,

    /// URL of the next page, if the server reports one
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page, if the server reports one
    #[serde(default)]
    pub previous: Option<String>,

    /// Records the server sent for this page that were dropped client-side
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl<T> OffsetPage<T> {
    /// Create a page with explicit continuation state
    #[must_use]
    pub const fn new(results: Vec<T>, count: u64, next: Option<String>) -> Self {
        Self {
            results,
            count,
            next,
            previous: None,
            skipped: 0,
        }
    }

    /// Create a terminal page holding every result
    #[must_use]
    pub fn single(results: Vec<T>) -> Self {
        let count = results.len() as u64;
        Self::new(results, count, None)
    }

    /// Whether the server signals further pages
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Whether this page carries no results
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of records the server sent, including ones dropped client-side
    #[must_use]
    pub fn received(&self) -> usize {
        self.results.len() + self.skipped
    }

    /// Transform every item while keeping the pagination envelope
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> OffsetPage<U> {
        OffsetPage {
            results: self.results.into_iter().map(f).collect(),
            count: self.count,
            next: self.next,
            previous: self.previous,
            skipped: self.skipped,
        }
    }
}

impl<T> Default for OffsetPage<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            count: 0,
            next: None,
            previous: None,
            skipped: 0,
        }
    }
}

/// Offset and limit for a single page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based index of the first item
    pub offset: u32,
    /// Maximum items in the page
    pub limit: u32,
}

impl PageRequest {
    /// Create a page request
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Request for the page following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}
