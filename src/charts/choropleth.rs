//! Choropleth map: state outlines shaded by total cases, with a colorbar.
//!
//! Longitude is scaled by the cosine of the mean latitude so the map keeps
//! the proportions of a plate carrée plot with equal aspect.

use super::colormap::Reds;
use super::renderer::{ChartError, StaticChartRenderer, EDGE_GRAY, FONT};
use crate::config::Config;
use crate::geo::{MapRegion, Point};
use plotters::prelude::*;
use std::path::Path;

/// matplotlib figsize=(12, 8)
const FIGURE_IN: (f64, f64) = (12.0, 8.0);
/// Share of the width used by the map; the rest holds the colorbar.
const MAP_SHARE: f64 = 0.85;
const COLORBAR_STEPS: usize = 128;

/// Lon/lat extent of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub(crate) fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, &(x, y)| {
            Some(match acc {
                None => Bounds {
                    min_x: x,
                    max_x: x,
                    min_y: y,
                    max_y: y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            })
        })
    }

    /// Grow the shorter side so that one degree of latitude and
    /// `cos(mean latitude)` degrees of longitude cover the same number of
    /// pixels in a `width` x `height` plot.
    pub(crate) fn fit_aspect(self, width: u32, height: u32) -> Self {
        let (cx, cy) = ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0);
        let shrink = cy.to_radians().cos().abs().max(0.01);
        let dx = (self.max_x - self.min_x).max(1e-6) * shrink;
        let dy = (self.max_y - self.min_y).max(1e-6);
        let target = f64::from(width.max(1)) / f64::from(height.max(1));

        let (dx, dy) = if dx / dy > target {
            (dx, dx / target)
        } else {
            (dy * target, dy)
        };
        let half_x = dx / shrink / 2.0;
        let half_y = dy / 2.0;
        Bounds {
            min_x: cx - half_x,
            max_x: cx + half_x,
            min_y: cy - half_y,
            max_y: cy + half_y,
        }
    }

    fn padded(self, fraction: f64) -> Self {
        let px = (self.max_x - self.min_x) * fraction;
        let py = (self.max_y - self.min_y) * fraction;
        Bounds {
            min_x: self.min_x - px,
            max_x: self.max_x + px,
            min_y: self.min_y - py,
            max_y: self.max_y + py,
        }
    }
}

impl StaticChartRenderer {
    /// No axes are drawn; `regions` must not be empty.
    pub fn render_choropleth(
        path: &Path,
        regions: &[MapRegion],
        title: &str,
        config: &Config,
    ) -> Result<(), ChartError> {
        let bounds = Bounds::of(regions.iter().flat_map(|r| r.rings.iter().flatten()))
            .ok_or(ChartError::Empty("no region has an outline"))?;
        let min_cases = regions.iter().map(|r| r.cases).min().unwrap_or(0) as f64;
        let mut max_cases = regions.iter().map(|r| r.cases).max().unwrap_or(0) as f64;
        if max_cases <= min_cases {
            max_cases = min_cases + 1.0;
        }

        let (width, height) = config.figure_px(FIGURE_IN.0, FIGURE_IN.1);
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(title, (FONT, config.font_px(16.0)))?;

        let (area_w, _) = root.dim_in_pixel();
        let (map_area, bar_area) = root.split_horizontally((f64::from(area_w) * MAP_SHARE) as u32);

        // Map
        let margin = config.font_px(6.0);
        let (map_w, map_h) = map_area.dim_in_pixel();
        let view = bounds.padded(0.02).fit_aspect(
            map_w.saturating_sub(2 * margin),
            map_h.saturating_sub(2 * margin),
        );
        let mut map = ChartBuilder::on(&map_area)
            .margin(margin)
            .build_cartesian_2d(view.min_x..view.max_x, view.min_y..view.max_y)?;

        map.draw_series(regions.iter().flat_map(|region| {
            let fill = Reds::normalized(region.cases as f64, min_cases, max_cases);
            region
                .rings
                .iter()
                .map(move |ring| Polygon::new(ring.clone(), fill.filled()))
        }))?;

        let edge = EDGE_GRAY.stroke_width(config.stroke_px(0.8));
        map.draw_series(regions.iter().flat_map(|region| {
            region.rings.iter().map(move |ring| {
                let mut closed = ring.clone();
                closed.extend(ring.first().copied());
                PathElement::new(closed, edge)
            })
        }))?;

        // Colorbar
        let mut bar = ChartBuilder::on(&bar_area)
            .margin_top(config.font_px(40.0))
            .margin_bottom(config.font_px(40.0))
            .margin_left(config.font_px(6.0))
            .margin_right(config.font_px(6.0))
            .y_label_area_size(config.font_px(48.0))
            .build_cartesian_2d(0.0..1.0, min_cases..max_cases)?;

        bar.configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&|v: &f64| Self::format_count(v.round() as i64))
            .y_label_style((FONT, config.font_px(9.0)))
            .draw()?;

        let step = (max_cases - min_cases) / COLORBAR_STEPS as f64;
        bar.draw_series((0..COLORBAR_STEPS).map(|i| {
            let lo = min_cases + step * i as f64;
            let color = Reds::at((i as f64 + 0.5) / COLORBAR_STEPS as f64);
            Rectangle::new([(0.0, lo), (1.0, lo + step)], color.filled())
        }))?;
        bar.draw_series(std::iter::once(Rectangle::new(
            [(0.0, min_cases), (1.0, max_cases)],
            BLACK.stroke_width(1),
        )))?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [(-50.0, -20.0), (-40.0, -30.0), (-45.0, -10.0)];
        let b = Bounds::of(points.iter()).unwrap();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (-50.0, -40.0, -30.0, -10.0));
        assert!(Bounds::of(std::iter::empty()).is_none());
    }

    #[test]
    fn equator_box_fits_square_plot() {
        // 10x20 degrees at the equator in a square plot: widen longitude.
        let b = Bounds {
            min_x: 0.0,
            max_x: 10.0,
            min_y: -10.0,
            max_y: 10.0,
        }
        .fit_aspect(500, 500);
        assert!(close(b.max_x - b.min_x, 20.0));
        assert!(close(b.max_y - b.min_y, 20.0));
        assert!(close((b.min_x + b.max_x) / 2.0, 5.0));
    }

    #[test]
    fn longitude_is_stretched_away_from_equator() {
        // Centered at 60 degrees: cos = 0.5, one lat degree = two lon degrees.
        let b = Bounds {
            min_x: 0.0,
            max_x: 20.0,
            min_y: 55.0,
            max_y: 65.0,
        }
        .fit_aspect(400, 400);
        assert!(close(b.max_x - b.min_x, 20.0));
        assert!(close(b.max_y - b.min_y, 10.0));
    }

    #[test]
    fn empty_regions_are_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("map.png");
        let err = StaticChartRenderer::render_choropleth(&out, &[], "t", &Config::default())
            .unwrap_err();
        assert!(matches!(err, ChartError::Empty(_)));
        assert!(!out.exists());
    }
}
