// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-side bar chart rendering.
//!
//! The chart is laid out as SVG, rasterized with resvg, and returned as a
//! `data:image/png;base64,` URL the frontend can drop into an `<img>`.

use super::{theme, tick_step, ChartPayload, ChartProducer, TITLE, X_AXIS_TITLE, Y_AXIS_TITLE};
use crate::config::ChartMode;
use crate::error::AppError;
use crate::models::WeeklyCount;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use resvg::usvg::fontdb;
use std::fmt::Write as _;
use std::sync::Arc;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;

const MARGIN_LEFT: f32 = 70.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_TOP: f32 = 60.0;
const MARGIN_BOTTOM: f32 = 90.0;

/// Fraction of each category slot filled by its bar.
const BAR_FILL: f32 = 0.8;

/// Beyond this many weeks the x labels are slanted to avoid overlap.
const MAX_FLAT_LABELS: usize = 12;

const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, sans-serif";

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Renders PNG bar charts.
#[derive(Clone)]
pub struct ImageChart {
    /// System fonts, loaded once and shared by every render.
    fontdb: Arc<fontdb::Database>,
}

impl Default for ImageChart {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageChart {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "Loaded fonts for chart rendering");

        Self { fontdb: Arc::new(db) }
    }

    /// Lay the chart out as an SVG document.
    pub fn render_svg(&self, series: &[WeeklyCount]) -> String {
        let plot_width = WIDTH as f32 - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = HEIGHT as f32 - MARGIN_TOP - MARGIN_BOTTOM;
        let plot_bottom = MARGIN_TOP + plot_height;

        let max = series.iter().map(|c| c.count).max().unwrap_or(0);
        let step = tick_step(max);
        let y_max = max.div_ceil(step).max(1) * step;
        let y_scale = plot_height / y_max as f32;

        let mut svg = String::with_capacity(4096 + series.len() * 256);

        // Writing into a String cannot fail.
        let _ = write!(
            svg,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}"><rect width="{w}" height="{h}" fill="{bg}"/>"##,
            w = WIDTH,
            h = HEIGHT,
            font = FONT_FAMILY,
            bg = theme::BACKGROUND,
        );

        // Title
        let _ = write!(
            svg,
            r##"<text x="{x}" y="36" text-anchor="middle" font-size="20" fill="{fg}">{title}</text>"##,
            x = WIDTH / 2,
            fg = theme::TEXT,
            title = TITLE,
        );

        // Horizontal gridlines at integer ticks
        let mut tick = 0;
        while tick <= y_max {
            let y = plot_bottom - tick as f32 * y_scale;
            let _ = write!(
                svg,
                r##"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="{grid}" stroke-width="1"/><text x="{lx}" y="{y:.1}" text-anchor="end" dominant-baseline="central" font-size="12" fill="{fg}">{tick}</text>"##,
                x1 = MARGIN_LEFT,
                x2 = MARGIN_LEFT + plot_width,
                grid = theme::GRID,
                lx = MARGIN_LEFT - 8.0,
                fg = theme::TEXT,
            );
            tick += step;
        }

        // Bars, one category slot per week
        let slot = plot_width / series.len().max(1) as f32;
        let slant = series.len() > MAX_FLAT_LABELS;
        for (i, point) in series.iter().enumerate() {
            let label = point.label();
            let center = MARGIN_LEFT + slot * (i as f32 + 0.5);
            let bar_width = slot * BAR_FILL;
            let bar_height = point.count as f32 * y_scale;

            let _ = write!(
                svg,
                r##"<rect x="{x:.1}" y="{y:.1}" width="{bw:.1}" height="{bh:.1}" fill="{fill}"><title>{label}: {count}</title></rect>"##,
                x = center - bar_width / 2.0,
                y = plot_bottom - bar_height,
                bw = bar_width,
                bh = bar_height,
                fill = theme::BAR,
                count = point.count,
            );

            let label_y = plot_bottom + 18.0;
            if slant {
                let _ = write!(
                    svg,
                    r##"<text x="{center:.1}" y="{label_y:.1}" text-anchor="end" font-size="11" fill="{fg}" transform="rotate(-45 {center:.1} {label_y:.1})">{label}</text>"##,
                    fg = theme::TEXT,
                );
            } else {
                let _ = write!(
                    svg,
                    r##"<text x="{center:.1}" y="{label_y:.1}" text-anchor="middle" font-size="12" fill="{fg}">{label}</text>"##,
                    fg = theme::TEXT,
                );
            }
        }

        // Axis titles
        let _ = write!(
            svg,
            r##"<text x="{x:.1}" y="{y}" text-anchor="middle" font-size="14" fill="{fg}">{xt}</text><text x="20" y="{cy:.1}" text-anchor="middle" font-size="14" fill="{fg}" transform="rotate(-90 20 {cy:.1})">{yt}</text>"##,
            x = MARGIN_LEFT + plot_width / 2.0,
            y = HEIGHT - 16,
            cy = MARGIN_TOP + plot_height / 2.0,
            fg = theme::TEXT,
            xt = X_AXIS_TITLE,
            yt = Y_AXIS_TITLE,
        );

        svg.push_str("</svg>");
        svg
    }

    /// Rasterize the chart to PNG bytes.
    pub fn render_png(&self, series: &[WeeklyCount]) -> Result<Vec<u8>, AppError> {
        let svg = self.render_svg(series);

        let mut options = resvg::usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);

        let tree = resvg::usvg::Tree::from_str(&svg, &options)
            .map_err(|e| AppError::Chart(format!("SVG parse error: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(WIDTH, HEIGHT)
            .ok_or_else(|| AppError::Chart("failed to create pixmap".to_string()))?;

        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| AppError::Chart(format!("PNG encode error: {e}")))
    }
}

impl ChartProducer for ImageChart {
    fn mode(&self) -> ChartMode {
        ChartMode::Image
    }

    fn produce(&self, series: &[WeeklyCount]) -> Result<ChartPayload, AppError> {
        let png = self.render_png(series)?;
        tracing::debug!(bytes = png.len(), weeks = series.len(), "Rendered chart image");

        Ok(ChartPayload::Image {
            image: format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png)),
        })
    }
}

/// Recover `(label, count)` pairs from the bar tooltips of a rendered SVG.
#[cfg(test)]
pub(crate) fn bar_points(svg: &str) -> Vec<(String, u32)> {
    svg.split("<title>")
        .skip(1)
        .filter_map(|rest| rest.split_once("</title>"))
        .filter_map(|(text, _)| {
            let (label, count) = text.rsplit_once(": ")?;
            Some((label.to_string(), count.parse().ok()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekKey;

    fn series(counts: &[(u32, u32)]) -> Vec<WeeklyCount> {
        counts
            .iter()
            .map(|&(week, count)| WeeklyCount {
                week: WeekKey { year: 2024, week },
                count,
            })
            .collect()
    }

    #[test]
    fn test_produce_png_data_url() {
        let payload = ImageChart::new()
            .produce(&series(&[(5, 3), (6, 2)]))
            .unwrap();

        let ChartPayload::Image { image } = payload else {
            panic!("expected image payload");
        };
        let encoded = image
            .strip_prefix(DATA_URL_PREFIX)
            .expect("data URL prefix");
        let png = STANDARD.decode(encoded).unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn test_svg_has_one_bar_per_week() {
        let svg = ImageChart::new().render_svg(&series(&[(1, 1), (2, 0), (3, 4)]));
        assert_eq!(
            bar_points(&svg),
            vec![
                ("2024-01".to_string(), 1),
                ("2024-02".to_string(), 0),
                ("2024-03".to_string(), 4),
            ]
        );
        assert!(svg.contains(TITLE));
        assert!(svg.contains(X_AXIS_TITLE));
        assert!(svg.contains(theme::BACKGROUND));
    }

    #[test]
    fn test_many_weeks_slant_labels() {
        let many: Vec<(u32, u32)> = (1..=20).map(|w| (w, 1)).collect();
        let svg = ImageChart::new().render_svg(&series(&many));
        assert!(svg.contains("rotate(-45"));

        let few = ImageChart::new().render_svg(&series(&[(1, 1)]));
        assert!(!few.contains("rotate(-45"));
    }

    #[test]
    fn test_empty_series_still_renders() {
        let png = ImageChart::new().render_png(&[]).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }
}
