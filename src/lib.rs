// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Charts: weekly workout summaries for signed-in users
//!
//! This crate provides a small read-only API that verifies the session
//! token shared with the main application, loads the user's workouts from
//! Firestore, and charts them per ISO week.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::ChartProducer;

/// Shared application state, built once at startup.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub chart_producer: Box<dyn ChartProducer>,
}

impl AppState {
    /// Assemble state with the chart producer selected by `config.chart_mode`.
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let chart_producer = services::producer_for(config.chart_mode);
        Self {
            config,
            db,
            chart_producer,
        }
    }
}
