// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout counts, computed fresh on every request.
//!
//! Weeks follow ISO 8601: they start on Monday and belong to the year that
//! contains their Thursday, so late-December dates can land in week 1 of the
//! next year.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::Workout;

/// Longest run of weeks (about ten years) that zero-filling will produce.
/// Wider spans come from stray dates and are returned sparse.
pub const MAX_FILLED_WEEKS: i64 = 520;

/// ISO week identifier. Orders by year, then week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Monday of this week.
    fn monday(self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
    }

    /// The week immediately after this one, or `None` past the last
    /// representable date.
    fn next(self) -> Option<Self> {
        self.monday()
            .and_then(|monday| monday.checked_add_signed(Duration::days(7)))
            .map(Self::from_date)
    }

    /// Number of weeks from `self` through `last`, inclusive.
    fn span_to(self, last: Self) -> Option<i64> {
        let (start, end) = (self.monday()?, last.monday()?);
        Some((end - start).num_weeks() + 1)
    }
}

/// Formats as `YYYY-WW`, e.g. `2024-05`.
impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.week)
    }
}

/// Number of workouts recorded in one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCount {
    pub week: WeekKey,
    pub count: u32,
}

impl WeeklyCount {
    pub fn label(&self) -> String {
        self.week.to_string()
    }
}

/// Group workouts by ISO week and count them, ordered by week ascending.
///
/// Weeks without workouts are absent. Workouts with an unparseable date
/// are skipped.
pub fn aggregate_weekly(workouts: &[Workout]) -> Vec<WeeklyCount> {
    let mut counts: BTreeMap<WeekKey, u32> = BTreeMap::new();

    for workout in workouts {
        match workout.calendar_date() {
            Some(date) => *counts.entry(WeekKey::from_date(date)).or_insert(0) += 1,
            None => tracing::warn!(
                user_id = %workout.user_id,
                date = %workout.date,
                "Skipping workout with unparseable date"
            ),
        }
    }

    counts
        .into_iter()
        .map(|(week, count)| WeeklyCount { week, count })
        .collect()
}

/// Insert zero-count entries for every week missing between the first and
/// last week of an ordered series.
///
/// Spans longer than [`MAX_FILLED_WEEKS`] are returned unchanged.
pub fn fill_empty_weeks(series: &[WeeklyCount]) -> Vec<WeeklyCount> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Vec::new();
    };

    match first.week.span_to(last.week) {
        Some(span) if span <= MAX_FILLED_WEEKS => {}
        span => {
            tracing::warn!(
                first = %first.week,
                last = %last.week,
                span = ?span,
                max = MAX_FILLED_WEEKS,
                "Week span too wide to fill, keeping sparse series"
            );
            return series.to_vec();
        }
    }

    let mut observed = series.iter().peekable();
    let mut filled = Vec::with_capacity(series.len());
    let mut week = Some(first.week);

    while let Some(current) = week.filter(|w| *w <= last.week) {
        let count = match observed.peek() {
            Some(entry) if entry.week == current => {
                let count = entry.count;
                observed.next();
                count
            }
            _ => 0,
        };
        filled.push(WeeklyCount {
            week: current,
            count,
        });
        week = current.next();
    }

    filled
}
