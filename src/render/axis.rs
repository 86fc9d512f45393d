use crate::render::surface::{Geometry, Shape, Style, Surface, TextAnchor};
use crate::scales::{BandScale, LinearScale};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const AXIS_COLOR: &str = "currentColor";
const FONT_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// Whole numbers without grouping, used for years.
    Integer,
    /// Decimals derived from the tick step.
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orient {
    Bottom,
    Left,
}

/// Decimals needed to tell ticks `step` apart.
fn precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Tick label with a typographic minus for negative values.
pub fn format_tick(value: f64, step: f64, format: TickFormat) -> String {
    let text = match format {
        TickFormat::Integer => format!("{}", value.round() as i64),
        TickFormat::Step => format!("{:.*}", precision(step), value),
    };
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().any(|c| c != '0' && c != '.') => format!("\u{2212}{}", rest),
        Some(rest) => rest.to_string(),
        None => text,
    }
}

fn tick_labels(scale: &LinearScale, count: usize, format: TickFormat) -> Vec<(f64, String)> {
    let ticks = scale.ticks(count);
    let step = match ticks.as_slice() {
        [a, b, ..] => (b - a).abs(),
        _ => 1.0,
    };
    ticks
        .iter()
        .map(|&t| (scale.scale(t), format_tick(t, step, format)))
        .collect()
}

fn draw(surface: &mut Surface, orient: Orient, offset: f64, range: (f64, f64), ticks: &[(f64, String)]) {
    let domain_line = match orient {
        Orient::Bottom => Geometry::Line {
            x1: range.0,
            y1: offset,
            x2: range.1,
            y2: offset,
        },
        Orient::Left => Geometry::Line {
            x1: offset,
            y1: range.0,
            x2: offset,
            y2: range.1,
        },
    };
    surface.add(Shape::new("domain", domain_line, Style::stroke(AXIS_COLOR, 1.0)));

    for (position, label) in ticks {
        let (line, text) = match orient {
            Orient::Bottom => (
                Geometry::Line {
                    x1: *position,
                    y1: offset,
                    x2: *position,
                    y2: offset + TICK_SIZE,
                },
                Geometry::Text {
                    x: *position,
                    y: offset + TICK_SIZE + TICK_PADDING + FONT_SIZE,
                    content: label.clone(),
                    anchor: TextAnchor::Middle,
                },
            ),
            Orient::Left => (
                Geometry::Line {
                    x1: offset - TICK_SIZE,
                    y1: *position,
                    x2: offset,
                    y2: *position,
                },
                Geometry::Text {
                    x: offset - TICK_SIZE - TICK_PADDING,
                    y: *position + FONT_SIZE / 3.0,
                    content: label.clone(),
                    anchor: TextAnchor::End,
                },
            ),
        };
        surface.add(Shape::new("tick", line, Style::stroke(AXIS_COLOR, 1.0)));
        surface.add(Shape::new(
            "tick-label",
            text,
            Style {
                fill: Some(AXIS_COLOR.to_string()),
                font_size: Some(FONT_SIZE),
                ..Style::default()
            },
        ));
    }
}

/// Horizontal axis along `y` for a continuous scale.
pub fn bottom_axis(surface: &mut Surface, scale: &LinearScale, count: usize, format: TickFormat, y: f64) {
    draw(surface, Orient::Bottom, y, scale.range(), &tick_labels(scale, count, format));
}

/// Vertical axis at `x` for a continuous scale.
pub fn left_axis(surface: &mut Surface, scale: &LinearScale, count: usize, x: f64) {
    draw(surface, Orient::Left, x, scale.range(), &tick_labels(scale, count, TickFormat::Step));
}

/// Horizontal axis with one label centred under each band.
pub fn bottom_band_axis(surface: &mut Surface, scale: &BandScale<i32>, range: (f64, f64), y: f64) {
    let ticks: Vec<(f64, String)> = scale
        .domain()
        .iter()
        .filter_map(|value| {
            scale
                .center(value)
                .map(|x| (x, format_tick(*value as f64, 1.0, TickFormat::Integer)))
        })
        .collect();
    draw(surface, Orient::Bottom, y, range, &ticks);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(1850.0, 50.0, TickFormat::Integer), "1850");
        assert_eq!(format_tick(-5.0, 5.0, TickFormat::Step), "\u{2212}5");
        assert_eq!(format_tick(0.5, 0.5, TickFormat::Step), "0.5");
        assert_eq!(format_tick(-0.0, 0.2, TickFormat::Step), "0.0");
        assert_eq!(format_tick(8.25, 0.05, TickFormat::Step), "8.25");
    }

    #[test]
    fn test_axis_draws_one_label_per_tick() {
        let mut surface = Surface::new(100.0, 100.0);
        let y = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        left_axis(&mut surface, &y, 5, 0.0);

        assert_eq!(surface.count("domain"), 1);
        assert_eq!(surface.count("tick"), 6);
        let labels: Vec<String> = surface
            .by_class("tick-label")
            .filter_map(|s| match &s.geometry {
                Geometry::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["0", "2", "4", "6", "8", "10"]);
    }

    #[test]
    fn test_band_axis_labels_buckets() {
        let mut surface = Surface::new(300.0, 100.0);
        let x = BandScale::new(vec![1750, 1800], (0.0, 300.0));
        bottom_band_axis(&mut surface, &x, (0.0, 300.0), 100.0);

        assert_eq!(surface.count("tick-label"), 2);
    }
}
