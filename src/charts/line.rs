//! Temporal chart: cases and deaths of one state against date.

use super::renderer::{ChartError, StaticChartRenderer, CASES_RED, DEATHS_BLUE, FONT};
use crate::config::Config;
use crate::data::TemporalSeries;
use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

/// matplotlib figsize=(12, 6)
const FIGURE_IN: (f64, f64) = (12.0, 6.0);
const MAX_DATE_LABELS: usize = 31;

/// Day/month, short enough to stay legible when rotated.
fn date_label(date: &NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

impl StaticChartRenderer {
    /// Cases as a red solid line with circles, deaths as a blue dashed line
    /// with squares. An empty series still produces axes and legend.
    pub fn render_temporal(
        path: &Path,
        series: &TemporalSeries,
        title: &str,
        config: &Config,
    ) -> Result<(), ChartError> {
        let (width, height) = config.figure_px(FIGURE_IN.0, FIGURE_IN.1);
        let line_w = config.stroke_px(1.5);
        let marker = config.stroke_px(3.0) as i32;

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (first, end) = series.date_span();
        let y_min = series.min_value().min(0);
        let y_max = Self::padded_max(series.max_value());

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, config.font_px(14.0)))
            .margin(config.font_px(10.0))
            .x_label_area_size(config.font_px(60.0))
            .y_label_area_size(config.font_px(60.0))
            .build_cartesian_2d(first..end, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_labels(series.len().clamp(2, MAX_DATE_LABELS))
            .x_label_formatter(&date_label)
            .x_label_style(
                (FONT, config.font_px(10.0))
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&|v: &i64| Self::format_count(*v))
            .y_label_style((FONT, config.font_px(10.0)))
            .x_desc("Data")
            .y_desc("Contagem")
            .axis_desc_style((FONT, config.font_px(12.0)))
            .light_line_style(WHITE.mix(0.0))
            .bold_line_style(BLACK.mix(0.15))
            .draw()?;

        let cases: Vec<(NaiveDate, i64)> = series
            .dates
            .iter()
            .copied()
            .zip(series.cases.iter().copied())
            .collect();
        let deaths: Vec<(NaiveDate, i64)> = series
            .dates
            .iter()
            .copied()
            .zip(series.deaths.iter().copied())
            .collect();

        chart
            .draw_series(LineSeries::new(
                cases.iter().copied(),
                CASES_RED.stroke_width(line_w),
            ))?
            .label("Casos")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 40, y)], CASES_RED.stroke_width(line_w))
            });
        chart.draw_series(
            cases
                .iter()
                .map(|&point| Circle::new(point, marker, CASES_RED.filled())),
        )?;

        chart
            .draw_series(DashedLineSeries::new(
                deaths.iter().copied(),
                line_w * 4,
                line_w * 2,
                DEATHS_BLUE.stroke_width(line_w),
            ))?
            .label("Mortes")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 40, y)], DEATHS_BLUE.stroke_width(line_w))
            });
        chart.draw_series(deaths.iter().map(|&point| {
            EmptyElement::at(point)
                + Rectangle::new([(-marker, -marker), (marker, marker)], DEATHS_BLUE.filled())
        }))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, config.font_px(10.0)))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(&str, i64, i64)]) -> TemporalSeries {
        TemporalSeries {
            state: "SP".to_string(),
            dates: points
                .iter()
                .map(|(d, _, _)| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap())
                .collect(),
            cases: points.iter().map(|p| p.1).collect(),
            deaths: points.iter().map(|p| p.2).collect(),
        }
    }

    fn small_config(dir: &Path) -> Config {
        Config {
            output_dir: dir.to_path_buf(),
            dpi: 50,
            show_outputs: false,
            ..Config::default()
        }
    }

    #[test]
    fn date_labels_are_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2022, 2, 7).unwrap();
        assert_eq!(date_label(&date), "07/02");
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path());
        let path = config.temporal_output();
        let data = series(&[
            ("2022-01-01", 100, 3),
            ("2022-01-02", 150, 4),
            ("2022-01-03", 90, 5),
        ]);

        StaticChartRenderer::render_temporal(&path, &data, "SP", &config).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn empty_series_still_draws_axes() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path());
        let path = config.temporal_output();

        StaticChartRenderer::render_temporal(&path, &series(&[]), "XX", &config).unwrap();
        assert!(path.exists());
    }
}
