// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout chart producers.
//!
//! Both adapters draw the same series with the same dark theme:
//! - [`ImageChart`] rasterizes to PNG and embeds it as a data URL
//! - [`DescriptionChart`] emits a declarative figure for the frontend

pub mod description;
pub mod image;

pub use description::{ChartFigure, DescriptionChart};
pub use image::ImageChart;

use crate::config::ChartMode;
use crate::error::AppError;
use crate::models::WeeklyCount;
use serde::Serialize;

pub(crate) const TITLE: &str = "Workouts per Week";
pub(crate) const X_AXIS_TITLE: &str = "Week";
pub(crate) const Y_AXIS_TITLE: &str = "Workouts";

/// Dark theme palette shared by both adapters.
pub(crate) mod theme {
    pub const BACKGROUND: &str = "#111111";
    pub const GRID: &str = "#283442";
    pub const TEXT: &str = "#f2f5fa";
    pub const BAR: &str = "#636efa";
    pub const TEMPLATE: &str = "plotly_dark";
}

/// A rendered chart, ready to be serialized as the response body.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChartPayload {
    /// `{"image": "data:image/png;base64,..."}`
    Image { image: String },
    /// The figure itself is the body.
    Description(ChartFigure),
}

/// Turns an ordered weekly series into a chart.
pub trait ChartProducer: Send + Sync {
    fn mode(&self) -> ChartMode;

    fn produce(&self, series: &[WeeklyCount]) -> Result<ChartPayload, AppError>;
}

/// Build the producer selected by configuration.
pub fn producer_for(mode: ChartMode) -> Box<dyn ChartProducer> {
    match mode {
        ChartMode::Image => Box::new(ImageChart::new()),
        ChartMode::Description => Box::new(DescriptionChart),
    }
}

/// Integer tick spacing for a y-axis whose largest value is `max`.
///
/// Aims for at most ten gridlines.
pub(crate) fn tick_step(max: u32) -> u32 {
    max.div_ceil(10).max(1)
}
