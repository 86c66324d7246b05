//! Ranking chart: one horizontal bar per state.

use super::renderer::{ChartError, StaticChartRenderer, FONT, GRID_GRAY, SKY_BLUE};
use crate::config::Config;
use crate::data::StateTotals;
use plotters::prelude::*;
use std::path::Path;

/// matplotlib figsize=(10, 8)
const FIGURE_IN: (f64, f64) = (10.0, 8.0);

impl StaticChartRenderer {
    /// Bars are drawn bottom-up in the given order, so an ascending ranking
    /// puts the largest state on top.
    pub fn render_ranking(
        path: &Path,
        totals: &[StateTotals],
        title: &str,
        config: &Config,
    ) -> Result<(), ChartError> {
        let (width, height) = config.figure_px(FIGURE_IN.0, FIGURE_IN.1);
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = totals.len().max(1) as u32;
        let x_min = totals.iter().map(|t| t.cases).min().unwrap_or(0).min(0);
        let x_max = Self::padded_max(totals.iter().map(|t| t.cases).max().unwrap_or(0));
        let names: Vec<&str> = totals.iter().map(|t| t.state.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, config.font_px(14.0)))
            .margin(config.font_px(10.0))
            .x_label_area_size(config.font_px(40.0))
            .y_label_area_size(config.font_px(40.0))
            .build_cartesian_2d(x_min..x_max, (0u32..n).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_labels(8)
            .x_label_formatter(&|v: &i64| Self::format_count(*v))
            .y_labels(names.len().max(1))
            .y_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => names
                    .get(*i as usize)
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .label_style((FONT, config.font_px(10.0)))
            .x_desc("Número de Casos")
            .y_desc("Estado")
            .axis_desc_style((FONT, config.font_px(12.0)))
            .light_line_style(WHITE.mix(0.0))
            .bold_line_style(GRID_GRAY.mix(0.7))
            .draw()?;

        let margin = config.stroke_px(2.0);
        let bar = |i: usize, cases: i64, style: ShapeStyle| {
            let i = i as u32;
            let mut rect = Rectangle::new(
                [(0, SegmentValue::Exact(i)), (cases, SegmentValue::Exact(i + 1))],
                style,
            );
            rect.set_margin(margin, margin, 0, 0);
            rect
        };

        chart.draw_series(
            totals
                .iter()
                .enumerate()
                .map(|(i, t)| bar(i, t.cases, SKY_BLUE.filled())),
        )?;
        chart.draw_series(
            totals
                .iter()
                .enumerate()
                .map(|(i, t)| bar(i, t.cases, BLACK.stroke_width(1))),
        )?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_bar_per_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_dir: dir.path().to_path_buf(),
            dpi: 50,
            show_outputs: false,
            ..Config::default()
        };
        let totals = [("RJ", 50), ("SP", 100)].map(|(state, cases)| StateTotals {
            state: state.to_string(),
            cases,
            deaths: 0,
        });
        let path = config.ranking_output();

        StaticChartRenderer::render_ranking(&path, &totals, "Ranking", &config).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
