//! Static Chart Renderer
//! Writes the report charts as PNG files with plotters' bitmap backend.
//!
//! Sizes follow matplotlib conventions: figure sizes
//! are given in inches and fonts in points, both scaled by the configured dpi.
//!
//! Charts:
//! 1. Temporal: cases and deaths of one state over time (`line.rs`)
//! 2. Ranking: horizontal bars of total cases per state (`bar.rs`)
//! 3. Choropleth: states shaded by total cases (`choropleth.rs`)

use plotters::drawing::DrawingAreaErrorKind;
use plotters::style::RGBColor;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub(crate) const FONT: &str = "sans-serif";

// Colors
pub(crate) const CASES_RED: RGBColor = RGBColor(214, 39, 40);
pub(crate) const DEATHS_BLUE: RGBColor = RGBColor(31, 119, 180);
pub(crate) const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub(crate) const EDGE_GRAY: RGBColor = RGBColor(204, 204, 204); // matplotlib edgecolor '0.8'
pub(crate) const GRID_GRAY: RGBColor = RGBColor(176, 176, 176);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Nothing to draw: {0}")]
    Empty(&'static str),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Open a saved chart with the system default viewer.
    ///
    /// Returns immediately; a viewer that cannot be launched is only logged.
    pub fn show(path: &Path) {
        match open::that_detached(path) {
            Ok(()) => info!(path = %path.display(), "opened chart"),
            Err(err) => warn!(path = %path.display(), error = %err, "could not open chart viewer"),
        }
    }

    /// Upper axis bound with 5% headroom, never below 1.
    pub(crate) fn padded_max(max: i64) -> i64 {
        let max = max.max(0);
        (max + max / 20).max(1)
    }

    /// Thousands separators for axis labels: `1234567` → `1.234.567`.
    pub(crate) fn format_count(value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_use_brazilian_grouping() {
        assert_eq!(StaticChartRenderer::format_count(0), "0");
        assert_eq!(StaticChartRenderer::format_count(999), "999");
        assert_eq!(StaticChartRenderer::format_count(1000), "1.000");
        assert_eq!(StaticChartRenderer::format_count(1234567), "1.234.567");
        assert_eq!(StaticChartRenderer::format_count(-45000), "-45.000");
    }

    #[test]
    fn axis_headroom() {
        assert_eq!(StaticChartRenderer::padded_max(0), 1);
        assert_eq!(StaticChartRenderer::padded_max(-10), 1);
        assert_eq!(StaticChartRenderer::padded_max(200), 210);
    }
}
