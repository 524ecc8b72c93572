// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout report: aggregate a user's workouts and chart them.

use crate::error::AppError;
use crate::models::{aggregate_weekly, fill_empty_weeks, Workout};
use crate::services::chart::{ChartPayload, ChartProducer};
use serde::Serialize;

pub const NO_WORKOUTS_MESSAGE: &str = "No workouts found";

/// Body of a successful `/workouts` response.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WeeklyReport {
    /// The user has nothing to chart.
    Message { message: String },
    Chart(ChartPayload),
}

/// Build the report for a user's workouts.
///
/// An empty workout list is not an error; it yields an informational message
/// instead of an empty chart.
pub fn build_weekly_report(
    workouts: &[Workout],
    producer: &dyn ChartProducer,
    fill_empty: bool,
) -> Result<WeeklyReport, AppError> {
    if workouts.is_empty() {
        return Ok(WeeklyReport::Message {
            message: NO_WORKOUTS_MESSAGE.to_string(),
        });
    }

    let mut series = aggregate_weekly(workouts);
    if series.is_empty() {
        // Every date was unparseable
        return Ok(WeeklyReport::Message {
            message: NO_WORKOUTS_MESSAGE.to_string(),
        });
    }
    if fill_empty {
        series = fill_empty_weeks(&series);
    }

    tracing::debug!(
        workouts = workouts.len(),
        weeks = series.len(),
        mode = ?producer.mode(),
        "Charting weekly workouts"
    );

    Ok(WeeklyReport::Chart(producer.produce(&series)?))
}
