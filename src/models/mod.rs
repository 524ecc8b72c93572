// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod user;
pub mod weekly;
pub mod workout;

pub use user::{InvalidUserId, User, UserId};
pub use weekly::{aggregate_weekly, fill_empty_weeks, WeekKey, WeeklyCount};
pub use workout::Workout;
