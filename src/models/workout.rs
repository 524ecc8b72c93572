// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model as written by the main application.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stored workout record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Owning user's document ID
    pub user_id: String,
    /// Workout name/title
    pub name: String,
    /// Muscle groups trained (free-form tags)
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    /// Workout date (`YYYY-MM-DD` or RFC 3339)
    pub date: String,
    /// Free-text notes
    #[serde(default)]
    pub description: String,
}

impl Workout {
    /// Calendar date of the workout as written, without timezone conversion.
    ///
    /// Returns `None` if `date` is not in a recognized format.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
