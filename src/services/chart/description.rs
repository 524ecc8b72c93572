// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Declarative chart figure (Plotly JSON schema) for client-side rendering.

use super::{theme, tick_step, ChartPayload, ChartProducer, TITLE, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::config::ChartMode;
use crate::error::AppError;
use crate::models::WeeklyCount;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A complete figure: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartFigure {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BarTrace {
    /// Always `"bar"`
    #[serde(rename = "type")]
    pub trace_type: String,
    pub name: String,
    /// Week labels (`YYYY-WW`)
    pub x: Vec<String>,
    /// Workout counts
    pub y: Vec<u32>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Layout {
    pub title: Title,
    pub template: String,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Axis {
    pub title: Title,
    /// `"category"` keeps week labels from being parsed as dates
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtick: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rangemode: Option<String>,
    pub gridcolor: String,
}

/// Produces [`ChartFigure`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionChart;

impl DescriptionChart {
    pub fn figure(&self, series: &[WeeklyCount]) -> ChartFigure {
        let max = series.iter().map(|c| c.count).max().unwrap_or(0);

        ChartFigure {
            data: vec![BarTrace {
                trace_type: "bar".to_string(),
                name: Y_AXIS_TITLE.to_string(),
                x: series.iter().map(WeeklyCount::label).collect(),
                y: series.iter().map(|c| c.count).collect(),
                marker: Marker {
                    color: theme::BAR.to_string(),
                },
            }],
            layout: Layout {
                title: title(TITLE),
                template: theme::TEMPLATE.to_string(),
                paper_bgcolor: theme::BACKGROUND.to_string(),
                plot_bgcolor: theme::BACKGROUND.to_string(),
                font: Font {
                    color: theme::TEXT.to_string(),
                },
                xaxis: Axis {
                    title: title(X_AXIS_TITLE),
                    axis_type: Some("category".to_string()),
                    tickmode: None,
                    dtick: None,
                    rangemode: None,
                    gridcolor: theme::GRID.to_string(),
                },
                yaxis: Axis {
                    title: title(Y_AXIS_TITLE),
                    axis_type: None,
                    tickmode: Some("linear".to_string()),
                    dtick: Some(tick_step(max)),
                    rangemode: Some("tozero".to_string()),
                    gridcolor: theme::GRID.to_string(),
                },
            },
        }
    }
}

fn title(text: &str) -> Title {
    Title {
        text: text.to_string(),
    }
}

impl ChartProducer for DescriptionChart {
    fn mode(&self) -> ChartMode {
        ChartMode::Description
    }

    fn produce(&self, series: &[WeeklyCount]) -> Result<ChartPayload, AppError> {
        Ok(ChartPayload::Description(self.figure(series)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekKey;

    #[test]
    fn test_figure_json_layout() {
        let series = vec![WeeklyCount {
            week: WeekKey {
                year: 2024,
                week: 9,
            },
            count: 4,
        }];

        let json = serde_json::to_value(DescriptionChart.figure(&series)).unwrap();

        assert_eq!(json["data"][0]["type"], "bar");
        assert_eq!(json["data"][0]["x"], serde_json::json!(["2024-09"]));
        assert_eq!(json["data"][0]["y"], serde_json::json!([4]));
        assert_eq!(json["layout"]["template"], "plotly_dark");
        assert_eq!(json["layout"]["xaxis"]["type"], "category");
        assert_eq!(json["layout"]["xaxis"]["title"]["text"], "Week");
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "Workouts");
        assert_eq!(json["layout"]["yaxis"]["dtick"], 1);
        assert!(json["layout"]["xaxis"].get("dtick").is_none());
    }

    #[test]
    fn test_large_counts_widen_ticks() {
        let series = vec![WeeklyCount {
            week: WeekKey {
                year: 2024,
                week: 1,
            },
            count: 42,
        }];
        let figure = DescriptionChart.figure(&series);
        assert_eq!(figure.layout.yaxis.dtick, Some(5));
    }

    #[test]
    fn test_figure_deserializes_back() {
        let figure = DescriptionChart.figure(&[]);
        let json = serde_json::to_string(&figure).unwrap();
        let parsed: ChartFigure = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, figure);
        assert!(parsed.data[0].x.is_empty());
    }
}
