// ABOUTME: Keyword-based exercise classification for session planning
// ABOUTME: Sorts catalog exercises into warmup/workout/cooldown and maps muscle names to body groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Role of an exercise within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Preparation before the main block
    Warmup,
    /// Main training block
    Workout,
    /// Stretching and mobility after the main block
    Cooldown,
}

/// Coarse body region targeted by an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Lats and back
    Back,
    /// Quadriceps, hamstrings, glutes
    Legs,
    /// Deltoids
    Shoulders,
    /// Biceps and triceps
    Arms,
    /// Abdominals and core
    Core,
    /// Fallback when no specific group matched
    FullBody,
}

impl MuscleGroup {
    /// Name keywords that select each specific group, in output order
    const KEYWORDS: [(Self, &'static [&'static str]); 6] = [
        (Self::Chest, &["pectoral", "chest"]),
        (Self::Back, &["lat", "back"]),
        (Self::Legs, &["quad", "ham", "glute"]),
        (Self::Shoulders, &["deltoid", "shoulder"]),
        (Self::Arms, &["biceps", "triceps"]),
        (Self::Core, &["abs", "core"]),
    ];
}

/// Classify an exercise from its name and description
///
/// Matching is case-insensitive. Cooldown keywords win over warmup keywords,
/// and anything unmatched is a regular workout exercise.
#[must_use]
pub fn classify_exercise(name: &str, description: &str) -> ExerciseType {
    let name = name.to_lowercase();
    let description = description.to_lowercase();

    if name.contains("stretch") || name.contains("mobility") || description.contains("stretch") {
        return ExerciseType::Cooldown;
    }

    if name.contains("warm")
        || name.contains("activation")
        || name.contains("band")
        || description.contains("activation")
    {
        return ExerciseType::Warmup;
    }

    ExerciseType::Workout
}

/// Map muscle names to the body groups they belong to
///
/// Groups are returned in declaration order without duplicates. When no
/// name matches a specific group the result is `[FullBody]`.
#[must_use]
pub fn map_muscles_to_groups<S: AsRef<str>>(muscles: &[S]) -> Vec<MuscleGroup> {
    let lowered: Vec<String> = muscles
        .iter()
        .map(|muscle| muscle.as_ref().to_lowercase())
        .collect();

    let groups: Vec<MuscleGroup> = MuscleGroup::KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            lowered
                .iter()
                .any(|muscle| keywords.iter().any(|keyword| muscle.contains(keyword)))
        })
        .map(|(group, _)| *group)
        .collect();

    if groups.is_empty() {
        vec![MuscleGroup::FullBody]
    } else {
        groups
    }
}
