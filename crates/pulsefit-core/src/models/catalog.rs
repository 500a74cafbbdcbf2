// ABOUTME: Exercise catalog entities as consumed from the paginated catalog service
// ABOUTME: Exercises, categories, muscles, equipment, media, and typed search filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exercise category (e.g. "Arms", "Legs")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Category {
    /// Catalog identifier
    pub id: u32,
    /// Display name
    pub name: String,
}

/// Muscle targeted by an exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Muscle {
    /// Catalog identifier
    pub id: u32,
    /// Latin name
    pub name: String,
    /// English name, may be empty upstream
    #[serde(default)]
    pub name_en: String,
    /// Whether the muscle is on the front of the body
    #[serde(default)]
    pub is_front: bool,
}

impl Muscle {
    /// English name when available, Latin name otherwise
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name_en.is_empty() {
            &self.name
        } else {
            &self.name_en
        }
    }
}

/// Equipment required by an exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Equipment {
    /// Catalog identifier
    pub id: u32,
    /// Display name
    pub name: String,
}

/// Image attached to an exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseImage {
    /// Catalog identifier
    pub id: u32,
    /// Image URL
    pub image: String,
    /// Whether this is the primary image
    #[serde(default)]
    pub is_main: bool,
    /// License identifier
    #[serde(default)]
    pub license: Option<u32>,
    /// License attribution
    #[serde(default)]
    pub license_author: Option<String>,
}

/// Video attached to an exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseVideo {
    /// Catalog identifier
    pub id: u32,
    /// Stable upstream identifier
    #[serde(default)]
    pub uuid: Option<Uuid>,
    /// Owning exercise identifier
    #[serde(default)]
    pub exercise: Option<u32>,
    /// Video URL
    pub video: String,
    /// Whether this is the primary video
    #[serde(default)]
    pub is_main: bool,
    /// File size in bytes
    #[serde(default)]
    pub size: Option<u64>,
    /// Duration in seconds, as reported upstream
    #[serde(default)]
    pub duration: Option<String>,
    /// Frame width in pixels
    #[serde(default)]
    pub width: Option<u32>,
    /// Frame height in pixels
    #[serde(default)]
    pub height: Option<u32>,
    /// Short codec name
    #[serde(default)]
    pub codec: Option<String>,
    /// Long codec name
    #[serde(default)]
    pub codec_long: Option<String>,
    /// License identifier
    #[serde(default)]
    pub license: Option<u32>,
    /// License attribution
    #[serde(default)]
    pub license_author: Option<String>,
}

/// Normalized exercise record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    /// Catalog identifier, used for de-duplication
    pub id: u32,
    /// Stable upstream identifier
    #[serde(default)]
    pub uuid: Option<Uuid>,
    /// English display name
    pub name: String,
    /// Plain-text description
    #[serde(default)]
    pub description: String,
    /// Category display name
    pub category: String,
    /// Category identifier
    #[serde(default)]
    pub category_id: Option<u32>,
    /// Primary muscles
    #[serde(default)]
    pub muscles: Vec<Muscle>,
    /// Secondary muscles
    #[serde(default)]
    pub muscles_secondary: Vec<Muscle>,
    /// Required equipment
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Identifiers of variation exercises
    #[serde(default)]
    pub variations: Vec<u32>,
    /// License identifier
    #[serde(default)]
    pub license: Option<u32>,
    /// License attribution
    #[serde(default)]
    pub license_author: Option<String>,
    /// Attached images
    #[serde(default)]
    pub images: Vec<ExerciseImage>,
    /// Attached videos
    #[serde(default)]
    pub videos: Vec<ExerciseVideo>,
}

impl Exercise {
    /// Case-insensitive substring match on name, description, or category
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

/// Typed exercise filters
///
/// Fields left as `None` are omitted from serialization so that cache keys
/// built from filters do not depend on which optional fields were spelled out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ExerciseFilters {
    /// Category identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<u32>,
    /// Muscle identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle: Option<u32>,
    /// Equipment identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<u32>,
    /// Free-text search term
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ExerciseFilters {
    /// Filters restricted to a category
    #[must_use]
    pub const fn by_category(category: u32) -> Self {
        Self {
            category: Some(category),
            muscle: None,
            equipment: None,
            search: None,
        }
    }

    /// Set the muscle filter
    #[must_use]
    pub const fn with_muscle(mut self, muscle: u32) -> Self {
        self.muscle = Some(muscle);
        self
    }

    /// Set the equipment filter
    #[must_use]
    pub const fn with_equipment(mut self, equipment: u32) -> Self {
        self.equipment = Some(equipment);
        self
    }

    /// Set the free-text search term
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Search term with surrounding whitespace removed, `None` when blank
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Copy of these filters with the search term removed
    #[must_use]
    pub fn without_search(&self) -> Self {
        Self {
            search: None,
            ..self.clone()
        }
    }
}
