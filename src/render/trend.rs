use crate::models::YearlyMean;
use crate::render::axis::{bottom_axis, left_axis, TickFormat};
use crate::render::frame::{ChartFrame, Margins};
use crate::render::surface::{Geometry, HoverBinding, PathCommand, Shape, Style, Surface};
use crate::scales::LinearScale;
use crate::utils::constants::{LINE_CHART_PADDING, LINE_COLOR, TREND_TOOLTIP_OFFSET};
use tracing::debug;

pub const LINE_CLASS: &str = "line";
pub const STRIP_CLASS: &str = "overlay";

pub const TREND_MARGINS: Margins = Margins::new(20.0, 30.0, 50.0, 60.0);

pub fn trend_label(point: &YearlyMean) -> String {
    format!("Year: {}\nTemperature: {:.2}°C", point.year, point.temperature)
}

/// Horizontal extent of the hover strip for each point.
///
/// Strips meet at the midpoints between neighbours; the first starts half a
/// gap before its point and the last runs to `right_edge`.
pub fn strip_bounds(xs: &[f64], right_edge: f64) -> Vec<(f64, f64)> {
    let n = xs.len();
    if n == 1 {
        return vec![(0.0, right_edge)];
    }

    (0..n)
        .map(|i| {
            let left = if i == 0 {
                (xs[0] - (xs[1] - xs[0]) / 2.0).max(0.0)
            } else {
                (xs[i - 1] + xs[i]) / 2.0
            };
            let right = if i + 1 == n {
                right_edge
            } else {
                (xs[i] + xs[i + 1]) / 2.0
            };
            (left, right)
        })
        .collect()
}

/// Static line of the global yearly means with per-year hover strips.
#[derive(Debug, Clone)]
pub struct TrendRenderer {
    frame: ChartFrame,
}

impl TrendRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            frame: ChartFrame::new(width, height, TREND_MARGINS),
        }
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    pub fn surface(&self) -> Surface {
        self.frame.surface()
    }

    pub fn x_scale(&self, series: &[YearlyMean]) -> Option<LinearScale> {
        LinearScale::from_extent(
            series.iter().map(|p| p.year as f64),
            0.0,
            (0.0, self.frame.inner_width()),
        )
    }

    pub fn y_scale(&self, series: &[YearlyMean]) -> Option<LinearScale> {
        LinearScale::from_extent(
            series.iter().map(|p| p.temperature),
            LINE_CHART_PADDING,
            (self.frame.inner_height(), 0.0),
        )
    }

    /// Replace the surface contents; returns the number of points drawn.
    pub fn draw(&self, surface: &mut Surface, series: &[YearlyMean]) -> usize {
        surface.clear();
        let (Some(x), Some(y)) = (self.x_scale(series), self.y_scale(series)) else {
            return 0;
        };
        let height = self.frame.inner_height();

        bottom_axis(surface, &x, (series.len() / 10).max(1), TickFormat::Integer, height);
        left_axis(surface, &y, 10, 0.0);

        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|p| (x.scale(p.year as f64), y.scale(p.temperature)))
            .collect();
        let commands = points
            .iter()
            .enumerate()
            .map(|(i, &(px, py))| {
                if i == 0 {
                    PathCommand::MoveTo(px, py)
                } else {
                    PathCommand::LineTo(px, py)
                }
            })
            .collect();
        surface.add(Shape::new(
            LINE_CLASS,
            Geometry::Path(commands),
            Style::stroke(LINE_COLOR, 1.5),
        ));

        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        for (point, (left, right)) in series.iter().zip(strip_bounds(&xs, self.frame.inner_width())) {
            surface.add(
                Shape::new(
                    STRIP_CLASS,
                    Geometry::Rect {
                        x: left,
                        y: 0.0,
                        width: right - left,
                        height,
                    },
                    Style::overlay(),
                )
                .with_hover(HoverBinding::new(trend_label(point), TREND_TOOLTIP_OFFSET)),
            );
        }

        debug!(points = series.len(), "drew trend line");
        series.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn series() -> Vec<YearlyMean> {
        vec![
            YearlyMean { year: 1900, temperature: 8.0 },
            YearlyMean { year: 1950, temperature: 8.5 },
            YearlyMean { year: 2000, temperature: 9.25 },
        ]
    }

    #[test]
    fn test_strip_bounds() {
        assert_eq!(
            strip_bounds(&[0.0, 100.0, 200.0], 300.0),
            vec![(0.0, 50.0), (50.0, 150.0), (150.0, 300.0)]
        );
        assert_eq!(strip_bounds(&[40.0], 300.0), vec![(0.0, 300.0)]);
        assert!(strip_bounds(&[], 300.0).is_empty());
    }

    #[test]
    fn test_y_domain_is_padded() {
        let renderer = TrendRenderer::new(960.0, 500.0);
        let y = renderer.y_scale(&series()).unwrap();
        assert_eq!(y.domain(), (7.0, 10.25));
    }

    #[test]
    fn test_draw_line_and_strips() {
        let renderer = TrendRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        assert_eq!(renderer.draw(&mut surface, &series()), 3);
        renderer.draw(&mut surface, &series());

        assert_eq!(surface.count(LINE_CLASS), 1);
        assert_eq!(surface.count(STRIP_CLASS), 3);

        // Plot area starts at the left margin; the middle strip covers x = 435.
        let hit = surface.hit_test(60.0 + 435.0, 200.0).and_then(|s| s.hover.clone());
        assert_eq!(
            hit.map(|h| h.content),
            Some("Year: 1950\nTemperature: 8.50°C".to_string())
        );
    }

    #[test]
    fn test_empty_series_draws_nothing() {
        let renderer = TrendRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        assert_eq!(renderer.draw(&mut surface, &[]), 0);
        assert!(surface.is_empty());
    }
}
