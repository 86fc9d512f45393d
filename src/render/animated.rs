//! Animated scatter-line chart.
//!
//! The line is revealed with a stroke-dash transition and each marker grows
//! in after a delay proportional to its index. Every draw starts a new
//! animation generation; timelines from earlier draws become no-ops.

use crate::models::YearlyMean;
use crate::render::axis::{bottom_axis, left_axis, TickFormat};
use crate::render::curve::monotone_x;
use crate::render::frame::{ChartFrame, Margins};
use crate::render::surface::{
    path_length, AnimatedAttribute, Easing, Geometry, HoverBinding, Shape, ShapeId, Style, Surface,
    Transition,
};
use crate::render::svg::num;
use crate::render::trend::{trend_label, LINE_CLASS};
use crate::scales::LinearScale;
use crate::utils::constants::{
    DEFAULT_ANIMATION_MS, DEFAULT_POINT_GROW_MS, DEFAULT_POINT_RADIUS, DOT_COLOR, LINE_COLOR,
    TREND_TOOLTIP_OFFSET,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DOT_CLASS: &str = "dot";

pub const SCATTER_MARGINS: Margins = Margins::new(20.0, 20.0, 40.0, 50.0);

/// Shared generation counter for one chart's animations.
#[derive(Debug, Clone, Default)]
pub struct AnimationToken {
    generation: Arc<AtomicU64>,
}

impl AnimationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating all earlier ones.
    pub fn advance(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Transitions started by one draw.
#[derive(Debug, Clone)]
pub struct Timeline {
    token: AnimationToken,
    generation: u64,
    targets: Vec<ShapeId>,
    duration: Duration,
}

impl Timeline {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stale(&self) -> bool {
        !self.token.is_current(self.generation)
    }

    /// Time at which every transition has finished.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Set animated attributes to their values at `elapsed`.
    ///
    /// Returns `false` without touching the surface when a newer draw has
    /// started since this timeline was created.
    pub fn apply(&self, surface: &mut Surface, elapsed: Duration) -> bool {
        if self.is_stale() {
            return false;
        }

        for id in &self.targets {
            let Some(shape) = surface.shape_mut(*id) else {
                continue;
            };
            for transition in shape.transitions.clone() {
                let value = transition.value_at(elapsed);
                match transition.attribute {
                    AnimatedAttribute::Radius => {
                        if let Geometry::Circle { r, .. } = &mut shape.geometry {
                            *r = value;
                        }
                    }
                    AnimatedAttribute::StrokeDashOffset => {
                        shape.style.stroke_dashoffset = Some(value);
                    }
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub duration: Duration,
    pub point_grow: Duration,
    pub point_radius: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_ANIMATION_MS),
            point_grow: Duration::from_millis(DEFAULT_POINT_GROW_MS),
            point_radius: DEFAULT_POINT_RADIUS,
        }
    }
}

impl AnimationSettings {
    /// Delay before marker `index` of `count` starts growing.
    pub fn point_delay(&self, index: usize, count: usize) -> Duration {
        if count == 0 {
            return Duration::ZERO;
        }
        self.duration.mul_f64(index as f64 / count as f64)
    }
}

pub struct AnimatedTrendRenderer {
    frame: ChartFrame,
    settings: AnimationSettings,
    token: AnimationToken,
}

impl AnimatedTrendRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            frame: ChartFrame::new(width, height, SCATTER_MARGINS),
            settings: AnimationSettings::default(),
            token: AnimationToken::new(),
        }
    }

    pub fn with_settings(mut self, settings: AnimationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn token(&self) -> &AnimationToken {
        &self.token
    }

    pub fn surface(&self) -> Surface {
        self.frame.surface()
    }

    pub fn y_scale(&self, series: &[YearlyMean]) -> Option<LinearScale> {
        LinearScale::from_extent(
            series.iter().map(|p| p.temperature),
            0.0,
            (self.frame.inner_height(), 0.0),
        )
    }

    /// Replace the surface contents and start a new animation generation.
    pub fn draw(&self, surface: &mut Surface, series: &[YearlyMean]) -> Timeline {
        surface.clear();
        let generation = self.token.advance();
        let mut timeline = Timeline {
            token: self.token.clone(),
            generation,
            targets: Vec::new(),
            duration: Duration::ZERO,
        };

        let x = LinearScale::from_extent(
            series.iter().map(|p| p.year as f64),
            0.0,
            (0.0, self.frame.inner_width()),
        );
        let (Some(x), Some(y)) = (x, self.y_scale(series)) else {
            return timeline;
        };

        bottom_axis(surface, &x, 10, TickFormat::Integer, self.frame.inner_height());
        left_axis(surface, &y, 10, 0.0);

        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|p| (x.scale(p.year as f64), y.scale(p.temperature)))
            .collect();
        let commands = monotone_x(&points);
        let length = path_length(&commands);

        let reveal = Transition {
            attribute: AnimatedAttribute::StrokeDashOffset,
            from: length,
            to: 0.0,
            delay: Duration::ZERO,
            duration: self.settings.duration,
            easing: Easing::Linear,
        };
        let mut line_style = Style::stroke(LINE_COLOR, 1.5);
        line_style.stroke_dasharray = Some(format!("{} {}", num(length), num(length)));
        line_style.stroke_dashoffset = Some(length);
        timeline.duration = reveal.end();
        timeline.targets.push(surface.add(
            Shape::new(LINE_CLASS, Geometry::Path(commands), line_style).with_transition(reveal),
        ));

        let count = series.len();
        for (i, (point, &(cx, cy))) in series.iter().zip(points.iter()).enumerate() {
            let grow = Transition {
                attribute: AnimatedAttribute::Radius,
                from: 0.0,
                to: self.settings.point_radius,
                delay: self.settings.point_delay(i, count),
                duration: self.settings.point_grow,
                easing: Easing::CubicInOut,
            };
            timeline.duration = timeline.duration.max(grow.end());
            let dot = Shape::new(
                DOT_CLASS,
                Geometry::Circle { cx, cy, r: 0.0 },
                Style::fill(DOT_COLOR),
            )
            .with_hover(HoverBinding::new(trend_label(point), TREND_TOOLTIP_OFFSET))
            .with_transition(grow);
            timeline.targets.push(surface.add(dot));
        }

        debug!(points = count, generation, length, "drew animated trend");
        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<YearlyMean> {
        (0..4)
            .map(|i| YearlyMean {
                year: 1900 + i * 10,
                temperature: 8.0 + i as f64,
            })
            .collect()
    }

    fn radius(surface: &Surface, index: usize) -> f64 {
        match surface.by_class(DOT_CLASS).nth(index).map(|s| &s.geometry) {
            Some(Geometry::Circle { r, .. }) => *r,
            _ => panic!("missing dot {}", index),
        }
    }

    #[test]
    fn test_point_delays() {
        let settings = AnimationSettings::default();
        assert_eq!(settings.point_delay(0, 4), Duration::ZERO);
        assert_eq!(settings.point_delay(1, 4), Duration::from_millis(1000));
        assert_eq!(settings.point_delay(3, 4), Duration::from_millis(3000));
    }

    #[test]
    fn test_markers_grow_over_time() {
        let renderer = AnimatedTrendRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        let timeline = renderer.draw(&mut surface, &series());

        assert_eq!(surface.count(DOT_CLASS), 4);
        assert_eq!(radius(&surface, 0), 0.0);
        assert_eq!(timeline.duration(), Duration::from_millis(4000));

        assert!(timeline.apply(&mut surface, Duration::from_millis(1250)));
        assert_eq!(radius(&surface, 0), 5.0);
        assert_eq!(radius(&surface, 1), 2.5);
        assert_eq!(radius(&surface, 3), 0.0);

        timeline.apply(&mut surface, Duration::from_secs(10));
        assert_eq!(radius(&surface, 3), 5.0);
        let line = surface.by_class(LINE_CLASS).next().unwrap();
        assert_eq!(line.style.stroke_dashoffset, Some(0.0));
    }

    #[test]
    fn test_stale_timeline_is_noop() {
        let renderer = AnimatedTrendRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        let first = renderer.draw(&mut surface, &series());
        let second = renderer.draw(&mut surface, &series());

        assert!(first.is_stale());
        assert!(!first.apply(&mut surface, Duration::from_secs(10)));
        assert_eq!(radius(&surface, 0), 0.0);
        assert!(second.apply(&mut surface, Duration::from_secs(10)));
        assert_eq!(surface.count(DOT_CLASS), 4);
    }

    #[test]
    fn test_line_starts_hidden() {
        let renderer = AnimatedTrendRenderer::new(960.0, 500.0);
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &series());

        let line = surface.by_class(LINE_CLASS).next().unwrap();
        let length = line.style.stroke_dashoffset.unwrap();
        assert!(length > 0.0);
        assert!(surface.to_svg().contains("attributeName=\"stroke-dashoffset\""));
    }

    #[test]
    fn test_y_domain_is_unpadded() {
        let renderer = AnimatedTrendRenderer::new(960.0, 500.0);
        assert_eq!(renderer.y_scale(&series()).unwrap().domain(), (8.0, 11.0));
    }
}
