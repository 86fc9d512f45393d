use crate::models::CountryYearBucket;
use crate::render::axis::{bottom_band_axis, left_axis};
use crate::render::frame::{ChartFrame, Margins};
use crate::render::surface::{Geometry, HoverBinding, Shape, Style, Surface};
use crate::scales::{extent, BandScale, LinearScale};
use crate::utils::constants::{BAND_PADDING, BAR_COLOR, BAR_TOOLTIP_OFFSET};
use tracing::debug;

pub const BAR_CLASS: &str = "bar";

pub const BAR_MARGINS: Margins = Margins::new(20.0, 30.0, 70.0, 60.0);

/// One bar per 50-year bucket of a single country.
#[derive(Debug, Clone)]
pub struct BarRenderer {
    frame: ChartFrame,
}

impl BarRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            frame: ChartFrame::new(width, height, BAR_MARGINS),
        }
    }

    pub fn surface(&self) -> Surface {
        self.frame.surface()
    }

    pub fn x_scale(&self, buckets: &[CountryYearBucket]) -> BandScale<i32> {
        BandScale::new(
            buckets.iter().map(|b| b.bucket_start).collect(),
            (0.0, self.frame.inner_width()),
        )
        .with_padding(BAND_PADDING)
    }

    /// Runs from zero to the largest bucket mean.
    pub fn y_scale(&self, buckets: &[CountryYearBucket]) -> Option<LinearScale> {
        let (_, max) = extent(buckets.iter().map(|b| b.temperature))?;
        Some(LinearScale::new((0.0, max), (self.frame.inner_height(), 0.0)))
    }

    /// Replace the surface contents; returns the number of bars drawn.
    pub fn draw(&self, surface: &mut Surface, buckets: &[CountryYearBucket]) -> usize {
        surface.clear();
        let Some(y) = self.y_scale(buckets) else {
            return 0;
        };
        let x = self.x_scale(buckets);
        let height = self.frame.inner_height();

        bottom_band_axis(surface, &x, (0.0, self.frame.inner_width()), height);
        left_axis(surface, &y, 10, 0.0);

        let baseline = y.scale(0.0);
        let mut drawn = 0;
        for bucket in buckets {
            let Some(left) = x.position(&bucket.bucket_start) else {
                continue;
            };
            let top = y.scale(bucket.temperature);
            let label = format!(
                "Year: {}\nTemperature: {:.2}°C",
                bucket.bucket_start, bucket.temperature
            );
            surface.add(
                Shape::new(
                    BAR_CLASS,
                    Geometry::Rect {
                        x: left,
                        y: top.min(baseline),
                        width: x.bandwidth(),
                        height: (baseline - top).abs(),
                    },
                    Style::fill(BAR_COLOR),
                )
                .with_hover(HoverBinding::new(label, BAR_TOOLTIP_OFFSET).following()),
            );
            drawn += 1;
        }

        debug!(bars = drawn, "drew bar chart");
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets() -> Vec<CountryYearBucket> {
        vec![
            CountryYearBucket {
                bucket_start: 1750,
                temperature: 10.0,
            },
            CountryYearBucket {
                bucket_start: 1800,
                temperature: 20.0,
            },
        ]
    }

    #[test]
    fn test_bars_rise_from_zero() {
        let renderer = BarRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        assert_eq!(renderer.draw(&mut surface, &buckets()), 2);

        let heights: Vec<f64> = surface
            .by_class(BAR_CLASS)
            .filter_map(|s| match s.geometry {
                Geometry::Rect { y, height, .. } => Some(y + height),
                _ => None,
            })
            .collect();
        // Every bar ends on the baseline at the bottom of the plot.
        assert_eq!(heights, vec![410.0, 410.0]);

        let tallest = surface.by_class(BAR_CLASS).nth(1).map(|s| s.geometry.clone());
        assert!(matches!(tallest, Some(Geometry::Rect { y, .. }) if y == 0.0));
    }

    #[test]
    fn test_redraw_replaces_bars() {
        let renderer = BarRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &buckets());
        renderer.draw(&mut surface, &buckets()[..1]);

        assert_eq!(surface.count(BAR_CLASS), 1);
    }

    #[test]
    fn test_no_buckets_no_bars() {
        let renderer = BarRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &buckets());

        assert_eq!(renderer.draw(&mut surface, &[]), 0);
        assert_eq!(surface.count(BAR_CLASS), 0);
    }

    #[test]
    fn test_domain_ignores_negative_means() {
        let renderer = BarRenderer::new(960.0, 500.0);
        let mixed = vec![
            CountryYearBucket {
                bucket_start: 1850,
                temperature: -5.0,
            },
            CountryYearBucket {
                bucket_start: 1900,
                temperature: 20.0,
            },
        ];
        let y = renderer.y_scale(&mixed).unwrap();
        assert_eq!(y.domain(), (0.0, 20.0));

        let mut surface = renderer.surface();
        assert_eq!(renderer.draw(&mut surface, &mixed), 2);
        // The cold bar starts at the zero baseline and extends downwards.
        let bar = surface.by_class(BAR_CLASS).next().map(|s| s.geometry.clone());
        assert!(matches!(bar, Some(Geometry::Rect { y, height, .. }) if y == 410.0 && height == 102.5));
    }

    #[test]
    fn test_tooltip_tracks_pointer() {
        let renderer = BarRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &buckets());

        let hover = surface.by_class(BAR_CLASS).next().and_then(|s| s.hover.clone()).unwrap();
        assert!(hover.follow_pointer);
        assert_eq!(hover.offset, (10.0, -10.0));
        assert_eq!(hover.content, "Year: 1750\nTemperature: 10.00°C");
    }
}
