// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod chart;
pub mod report;

pub use chart::{producer_for, ChartPayload, ChartProducer, DescriptionChart, ImageChart};
pub use report::{build_weekly_report, WeeklyReport};
