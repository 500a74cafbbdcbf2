// ABOUTME: Session history aggregation for progress display
// ABOUTME: Volume and calorie totals, day streaks, Monday-based weekly buckets, and personal records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progress aggregation
//!
//! All functions accept any iterator of borrowed sessions so callers can pass
//! a full history slice or the filtered output of [`sessions_in_period`]
//! without cloning.

use crate::models::{PersonalRecord, ProgressStats, WeeklySummary, WorkoutSession};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Aggregate totals and streaks over a list of sessions
///
/// Streaks are computed over distinct session days sorted ascending. A gap of
/// exactly one day extends the running streak, a larger gap resets it to 1,
/// and `best_streak` tracks the longest run seen. `current_streak` is anchored
/// to the most recent session day, not to `today`; `today` only selects the
/// calendar month for `workout_days_this_month`.
#[must_use]
pub fn aggregate_progress<'a>(
    sessions: impl IntoIterator<Item = &'a WorkoutSession>,
    today: NaiveDate,
) -> ProgressStats {
    let mut stats = ProgressStats::default();
    let mut days = BTreeSet::new();

    for session in sessions {
        stats.total_workouts += 1;
        stats.total_volume += session.volume();
        stats.total_calories += u64::from(session.calories());
        days.insert(session.date);
    }

    let (current_streak, best_streak) = streaks(&days);
    stats.current_streak = current_streak;
    stats.best_streak = best_streak;
    stats.workout_days_this_month = days
        .iter()
        .filter(|day| day.year() == today.year() && day.month() == today.month())
        .count();

    debug!(
        total_workouts = stats.total_workouts,
        current_streak, best_streak, "Aggregated progress statistics"
    );

    stats
}

/// Walk ascending distinct days and return (current, best) streaks
fn streaks(days: &BTreeSet<NaiveDate>) -> (u32, u32) {
    let mut previous: Option<NaiveDate> = None;
    let mut running = 0_u32;
    let mut best = 0_u32;

    for &day in days {
        running = match previous {
            Some(prev) if (day - prev).num_days() == 1 => running + 1,
            _ => 1,
        };
        best = best.max(running);
        previous = Some(day);
    }

    (running, best)
}

/// Monday of the week containing `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Group sessions into Monday-based calendar weeks
///
/// Weeks are returned in ascending order and labelled by position
/// ("Week 1"/"W1" for the earliest). Weeks without sessions are not emitted.
#[must_use]
pub fn group_by_week<'a>(
    sessions: impl IntoIterator<Item = &'a WorkoutSession>,
) -> Vec<WeeklySummary> {
    #[derive(Default)]
    struct WeekTotals {
        volume: f64,
        calories: u64,
        workouts: usize,
        sets: usize,
    }

    let mut weeks: BTreeMap<NaiveDate, WeekTotals> = BTreeMap::new();
    for session in sessions {
        let totals = weeks.entry(week_start(session.date)).or_default();
        totals.volume += session.volume();
        totals.calories += u64::from(session.calories());
        totals.workouts += 1;
        totals.sets += session.set_count();
    }

    weeks
        .into_iter()
        .enumerate()
        .map(|(index, (week_start, totals))| WeeklySummary {
            week_start,
            volume: totals.volume,
            calories: totals.calories,
            workouts: totals.workouts,
            sets: totals.sets,
            label: format!("Week {}", index + 1),
            short_label: format!("W{}", index + 1),
        })
        .collect()
}

/// Time window for progress views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPeriod {
    /// Last 7 days
    Week,
    /// Last calendar month
    #[default]
    Month,
    /// Last three calendar months
    ThreeMonths,
    /// Last calendar year
    Year,
}

impl ProgressPeriod {
    /// First day included in the window ending at `today`
    ///
    /// Month arithmetic clamps to the last valid day, so March 31 minus one
    /// month is February 28 (or 29).
    #[must_use]
    pub fn start_date(self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            Self::Week => today.checked_sub_days(Days::new(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::ThreeMonths => today.checked_sub_months(Months::new(3)),
            Self::Year => today.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }
}

/// Completed sessions dated on or after the period start
#[must_use]
pub fn sessions_in_period(
    sessions: &[WorkoutSession],
    period: ProgressPeriod,
    today: NaiveDate,
) -> Vec<&WorkoutSession> {
    let start = period.start_date(today);
    sessions
        .iter()
        .filter(|session| session.is_completed() && session.date >= start)
        .collect()
}

/// Best set per exercise name across a session history
///
/// Sessions are replayed in start order and each set is offered to the current
/// record with [`PersonalRecord::is_improved_by`]. Sets with zero repetitions
/// are ignored. Records are returned sorted by exercise name.
#[must_use]
pub fn best_sets_by_exercise<'a>(
    sessions: impl IntoIterator<Item = &'a WorkoutSession>,
) -> Vec<PersonalRecord> {
    let mut ordered: Vec<&WorkoutSession> = sessions.into_iter().collect();
    ordered.sort_by_key(|session| session.started_at);

    let mut records: BTreeMap<&str, PersonalRecord> = BTreeMap::new();
    for session in ordered {
        let achieved_at = session.completed_at.unwrap_or(session.started_at);
        for set in session.exercise_sets.iter().filter(|set| set.reps > 0) {
            let improved = match records.get(set.exercise_name.as_str()) {
                Some(record) => record.is_improved_by(set.weight_kg, set.reps),
                None => true,
            };
            if improved {
                records.insert(
                    set.exercise_name.as_str(),
                    PersonalRecord {
                        exercise_id: set.exercise_id.clone(),
                        exercise_name: set.exercise_name.clone(),
                        max_weight_kg: set.weight_kg,
                        max_reps: set.reps,
                        achieved_at,
                    },
                );
            }
        }
    }

    records.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap_or_default()
    }

    #[test]
    fn test_single_day_counts_as_streak_of_one() {
        let days = BTreeSet::from([day(10)]);
        assert_eq!(streaks(&days), (1, 1));
    }

    #[test]
    fn test_empty_history_has_no_streak() {
        assert_eq!(streaks(&BTreeSet::new()), (0, 0));
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-01-10 is a Wednesday
        assert_eq!(week_start(day(10)), day(8));
        assert_eq!(week_start(day(8)), day(8));
        assert_eq!(week_start(day(14)), day(8));
    }
}
