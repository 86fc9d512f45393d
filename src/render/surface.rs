//! Retained drawing surface.
//!
//! Renderers push shapes onto a [`Surface`] instead of emitting markup
//! directly. The surface can be hit-tested for hover interaction, mutated by
//! animation timelines and serialized to SVG.

use crate::render::svg::{escape, num};
use geo::{Contains, LineString, MultiPolygon, Point};
use std::fmt::Write as _;
use std::time::Duration;

pub type ShapeId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo(f64, f64, f64, f64, f64, f64),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Path(Vec<PathCommand>),
    /// Filled area with holes, hit-tested against its interior.
    Region(MultiPolygon<f64>),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: TextAnchor,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_dasharray: Option<String>,
    pub stroke_dashoffset: Option<f64>,
    pub font_size: Option<f64>,
    /// Receive pointer events even when unpainted.
    pub pointer_events_all: bool,
}

impl Style {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroke(color: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some("none".to_string()),
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    /// Invisible but hoverable.
    pub fn overlay() -> Self {
        Self {
            fill: Some("none".to_string()),
            pointer_events_all: true,
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = Some(width);
        self
    }
}

/// Tooltip attached to a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverBinding {
    pub content: String,
    /// Tooltip position relative to the pointer.
    pub offset: (f64, f64),
    /// Reposition on every pointer move instead of only on enter.
    pub follow_pointer: bool,
}

impl HoverBinding {
    pub fn new(content: impl Into<String>, offset: (f64, f64)) -> Self {
        Self {
            content: content.into(),
            offset,
            follow_pointer: false,
        }
    }

    pub fn following(mut self) -> Self {
        self.follow_pointer = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedAttribute {
    Radius,
    StrokeDashOffset,
}

impl AnimatedAttribute {
    fn svg_name(&self) -> &'static str {
        match self {
            AnimatedAttribute::Radius => "r",
            AnimatedAttribute::StrokeDashOffset => "stroke-dashoffset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicInOut,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let t3 = t2 - 2.0;
                    (t3 * t3 * t3 + 2.0) / 2.0
                }
            }
        }
    }
}

/// A single attribute transition, exported as an SVG `<animate>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub attribute: AnimatedAttribute,
    pub from: f64,
    pub to: f64,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    /// Attribute value `elapsed` after the timeline started.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if elapsed <= self.delay {
            return self.from;
        }
        let running = elapsed - self.delay;
        if self.duration.is_zero() || running >= self.duration {
            return self.to;
        }

        let t = running.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }

    fn to_svg(&self) -> String {
        let spline = match self.easing {
            Easing::Linear => String::new(),
            Easing::CubicInOut => {
                " calcMode=\"spline\" keyTimes=\"0;1\" keySplines=\"0.645 0.045 0.355 1\"".to_string()
            }
        };
        format!(
            "<animate attributeName=\"{}\" from=\"{}\" to=\"{}\" begin=\"{}ms\" dur=\"{}ms\" fill=\"freeze\"{}/>",
            self.attribute.svg_name(),
            num(self.from),
            num(self.to),
            self.delay.as_millis(),
            self.duration.as_millis(),
            spline
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub class: &'static str,
    pub geometry: Geometry,
    pub style: Style,
    pub hover: Option<HoverBinding>,
    pub transitions: Vec<Transition>,
}

impl Shape {
    pub fn new(class: &'static str, geometry: Geometry, style: Style) -> Self {
        Self {
            id: 0,
            class,
            geometry,
            style,
            hover: None,
            transitions: Vec::new(),
        }
    }

    pub fn with_hover(mut self, hover: HoverBinding) -> Self {
        self.hover = Some(hover);
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Whether the local point lies inside the shape's hit area.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match &self.geometry {
            Geometry::Rect {
                x: rx,
                y: ry,
                width,
                height,
            } => {
                let (x0, x1) = ordered(*rx, rx + width);
                let (y0, y1) = ordered(*ry, ry + height);
                x >= x0 && x <= x1 && y >= y0 && y <= y1
            }
            Geometry::Circle { cx, cy, r } => {
                *r > 0.0 && (x - cx).powi(2) + (y - cy).powi(2) <= r * r
            }
            Geometry::Region(region) => region.contains(&Point::new(x, y)),
            Geometry::Path(_) | Geometry::Line { .. } | Geometry::Text { .. } => false,
        }
    }

    fn write_svg(&self, out: &mut String) {
        let mut attrs = format!(" class=\"{}\"", self.class);
        let style = &self.style;
        if let Some(fill) = &style.fill {
            let _ = write!(attrs, " fill=\"{}\"", escape(fill));
        }
        if let Some(stroke) = &style.stroke {
            let _ = write!(attrs, " stroke=\"{}\"", escape(stroke));
        }
        if let Some(width) = style.stroke_width {
            let _ = write!(attrs, " stroke-width=\"{}\"", num(width));
        }
        if let Some(dash) = &style.stroke_dasharray {
            let _ = write!(attrs, " stroke-dasharray=\"{}\"", escape(dash));
        }
        if let Some(offset) = style.stroke_dashoffset {
            let _ = write!(attrs, " stroke-dashoffset=\"{}\"", num(offset));
        }
        if let Some(size) = style.font_size {
            let _ = write!(attrs, " font-size=\"{}\"", num(size));
        }
        if style.pointer_events_all {
            attrs.push_str(" pointer-events=\"all\"");
        }

        let (tag, geometry_attrs, text) = match &self.geometry {
            Geometry::Path(commands) => ("path", format!(" d=\"{}\"", path_data(commands)), None),
            Geometry::Region(region) => (
                "path",
                format!(" d=\"{}\" fill-rule=\"evenodd\"", path_data(&region_commands(region))),
                None,
            ),
            Geometry::Rect {
                x,
                y,
                width,
                height,
            } => (
                "rect",
                format!(
                    " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                    num(*x),
                    num(*y),
                    num(width.max(0.0)),
                    num(height.max(0.0))
                ),
                None,
            ),
            Geometry::Circle { cx, cy, r } => (
                "circle",
                format!(" cx=\"{}\" cy=\"{}\" r=\"{}\"", num(*cx), num(*cy), num(*r)),
                None,
            ),
            Geometry::Line { x1, y1, x2, y2 } => (
                "line",
                format!(
                    " x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                    num(*x1),
                    num(*y1),
                    num(*x2),
                    num(*y2)
                ),
                None,
            ),
            Geometry::Text {
                x,
                y,
                content,
                anchor,
            } => (
                "text",
                format!(
                    " x=\"{}\" y=\"{}\" text-anchor=\"{}\"",
                    num(*x),
                    num(*y),
                    anchor.as_str()
                ),
                Some(content.as_str()),
            ),
        };

        let mut children = String::new();
        if let Some(text) = text {
            children.push_str(&escape(text));
        }
        if let Some(hover) = &self.hover {
            let _ = write!(children, "<title>{}</title>", escape(&hover.content));
        }
        for transition in &self.transitions {
            children.push_str(&transition.to_svg());
        }

        if children.is_empty() {
            let _ = writeln!(out, "<{}{}{}/>", tag, attrs, geometry_attrs);
        } else {
            let _ = writeln!(out, "<{}{}{}>{}</{}>", tag, attrs, geometry_attrs, children, tag);
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        match *command {
            PathCommand::MoveTo(x, y) => {
                let _ = write!(d, "M{},{}", num(x), num(y));
            }
            PathCommand::LineTo(x, y) => {
                let _ = write!(d, "L{},{}", num(x), num(y));
            }
            PathCommand::CubicTo(x1, y1, x2, y2, x, y) => {
                let _ = write!(
                    d,
                    "C{},{},{},{},{},{}",
                    num(x1),
                    num(y1),
                    num(x2),
                    num(y2),
                    num(x),
                    num(y)
                );
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

/// Point on a cubic Bézier segment.
fn cubic_point(p0: (f64, f64), c1: (f64, f64), c2: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let x = u * u * u * p0.0 + 3.0 * u * u * t * c1.0 + 3.0 * u * t * t * c2.0 + t * t * t * p1.0;
    let y = u * u * u * p0.1 + 3.0 * u * u * t * c1.1 + 3.0 * u * t * t * c2.1 + t * t * t * p1.1;
    (x, y)
}

const CUBIC_SAMPLES: usize = 16;

/// Flatten path commands into polylines, one per subpath.
pub fn polygons(commands: &[PathCommand]) -> Vec<Vec<(f64, f64)>> {
    let mut rings = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for command in commands {
        match *command {
            PathCommand::MoveTo(x, y) => {
                if current.len() > 1 {
                    rings.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push((x, y));
            }
            PathCommand::LineTo(x, y) => current.push((x, y)),
            PathCommand::CubicTo(x1, y1, x2, y2, x, y) => {
                let start = current.last().copied().unwrap_or((x, y));
                for i in 1..=CUBIC_SAMPLES {
                    let t = i as f64 / CUBIC_SAMPLES as f64;
                    current.push(cubic_point(start, (x1, y1), (x2, y2), (x, y), t));
                }
            }
            PathCommand::Close => {
                if current.len() > 1 {
                    rings.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if current.len() > 1 {
        rings.push(current);
    }

    rings
}

/// Approximate length of the stroked path.
pub fn path_length(commands: &[PathCommand]) -> f64 {
    polygons(commands)
        .iter()
        .map(|ring| {
            ring.windows(2)
                .map(|w| ((w[1].0 - w[0].0).powi(2) + (w[1].1 - w[0].1).powi(2)).sqrt())
                .sum::<f64>()
        })
        .sum()
}

/// One closed subpath per ring, exterior first.
pub fn region_commands(region: &MultiPolygon<f64>) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    for polygon in &region.0 {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            push_ring(&mut commands, ring);
        }
    }
    commands
}

fn push_ring(commands: &mut Vec<PathCommand>, ring: &LineString<f64>) {
    let mut coords = ring.coords();
    let Some(first) = coords.next() else {
        return;
    };
    commands.push(PathCommand::MoveTo(first.x, first.y));
    commands.extend(coords.map(|c| PathCommand::LineTo(c.x, c.y)));
    commands.push(PathCommand::Close);
}

/// A fixed-size canvas holding the shapes of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: f64,
    height: f64,
    /// Translation applied to every shape (chart margins).
    origin: (f64, f64),
    shapes: Vec<Shape>,
    next_id: ShapeId,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            origin: (0.0, 0.0),
            shapes: Vec::new(),
            next_id: 0,
        }
    }

    pub fn with_origin(mut self, left: f64, top: f64) -> Self {
        self.origin = (left, top);
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Remove every shape. Ids are not reused, so stale ids never alias new shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn add(&mut self, mut shape: Shape) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;
        shape.id = id;
        self.shapes.push(shape);
        id
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn count(&self, class: &str) -> usize {
        self.shapes.iter().filter(|s| s.class == class).count()
    }

    pub fn by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Shape> + 'a {
        self.shapes.iter().filter(move |s| s.class == class)
    }

    /// Topmost hoverable shape under a point in surface coordinates.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Shape> {
        let (local_x, local_y) = (x - self.origin.0, y - self.origin.1);
        self.shapes
            .iter()
            .rev()
            .filter(|s| s.hover.is_some())
            .find(|s| s.contains(local_x, local_y))
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(64 * self.shapes.len() + 256);
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = num(self.width),
            h = num(self.height)
        );
        let _ = writeln!(
            out,
            "<g transform=\"translate({},{})\">",
            num(self.origin.0),
            num(self.origin.1)
        );
        for shape in &self.shapes {
            shape.write_svg(&mut out);
        }
        out.push_str("</g>\n</svg>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(x: f64, y: f64, size: f64) -> Geometry {
        Geometry::Path(vec![
            PathCommand::MoveTo(x, y),
            PathCommand::LineTo(x + size, y),
            PathCommand::LineTo(x + size, y + size),
            PathCommand::LineTo(x, y + size),
            PathCommand::Close,
        ])
    }

    fn rect(x: f64, y: f64, size: f64) -> Geometry {
        Geometry::Rect {
            x,
            y,
            width: size,
            height: size,
        }
    }

    #[test]
    fn test_clear_and_rebuild_does_not_accumulate() {
        let mut surface = Surface::new(100.0, 100.0);
        for _ in 0..2 {
            surface.clear();
            surface.add(Shape::new("bar", square(0.0, 0.0, 10.0), Style::fill("red")));
            surface.add(Shape::new("bar", square(20.0, 0.0, 10.0), Style::fill("red")));
        }

        assert_eq!(surface.count("bar"), 2);
        assert_eq!(surface.shapes()[0].id, 2);
    }

    #[test]
    fn test_hit_test_respects_origin_and_order() {
        let mut surface = Surface::new(200.0, 200.0).with_origin(50.0, 20.0);
        let below = surface.add(
            Shape::new("a", rect(0.0, 0.0, 100.0), Style::fill("red"))
                .with_hover(HoverBinding::new("below", (0.0, 0.0))),
        );
        let above = surface.add(
            Shape::new("b", rect(10.0, 10.0, 10.0), Style::fill("blue"))
                .with_hover(HoverBinding::new("above", (0.0, 0.0))),
        );

        assert_eq!(surface.hit_test(65.0, 35.0).map(|s| s.id), Some(above));
        assert_eq!(surface.hit_test(55.0, 25.0).map(|s| s.id), Some(below));
        assert!(surface.hit_test(10.0, 10.0).is_none());
    }

    fn lake_region() -> MultiPolygon<f64> {
        polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 30.0, y: 0.0), (x: 30.0, y: 30.0), (x: 0.0, y: 30.0)],
            interiors: [[(x: 10.0, y: 10.0), (x: 20.0, y: 10.0), (x: 20.0, y: 20.0), (x: 10.0, y: 20.0)]]
        )
        .into()
    }

    #[test]
    fn test_hole_is_not_hit() {
        let shape = Shape::new("country", Geometry::Region(lake_region()), Style::default());

        assert!(shape.contains(5.0, 5.0));
        assert!(!shape.contains(15.0, 15.0));
        assert!(!shape.contains(35.0, 5.0));
    }

    #[test]
    fn test_region_outputs_every_ring() {
        let commands = region_commands(&lake_region());

        let closes = commands.iter().filter(|c| **c == PathCommand::Close).count();
        assert_eq!(closes, 2);
        assert_eq!(commands.len(), 12);
        assert_eq!(commands[0], PathCommand::MoveTo(0.0, 0.0));
    }

    #[test]
    fn test_plain_path_is_not_hoverable() {
        let line = Shape::new("line", square(0.0, 0.0, 10.0), Style::stroke("steelblue", 1.5));
        assert!(!line.contains(5.0, 5.0));
    }

    #[test]
    fn test_zero_radius_circle_is_not_hit() {
        let dot = Shape::new("dot", Geometry::Circle { cx: 0.0, cy: 0.0, r: 0.0 }, Style::default());
        assert!(!dot.contains(0.0, 0.0));
    }

    #[test]
    fn test_svg_output() {
        let mut surface = Surface::new(120.0, 80.0).with_origin(10.0, 5.0);
        surface.add(
            Shape::new("bar", Geometry::Rect { x: 1.0, y: 2.0, width: 3.5, height: 4.0 }, Style::fill("steelblue"))
                .with_hover(HoverBinding::new("Year: 1750\nTemperature: 2.00°C", (10.0, -10.0))),
        );

        let svg = surface.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"120\" height=\"80\""));
        assert!(svg.contains("<g transform=\"translate(10,5)\">"));
        assert!(svg.contains(
            "<rect class=\"bar\" fill=\"steelblue\" x=\"1\" y=\"2\" width=\"3.5\" height=\"4\"><title>Year: 1750\nTemperature: 2.00°C</title></rect>"
        ));
    }

    #[test]
    fn test_transition_values() {
        let grow = Transition {
            attribute: AnimatedAttribute::Radius,
            from: 0.0,
            to: 5.0,
            delay: Duration::from_millis(100),
            duration: Duration::from_millis(500),
            easing: Easing::Linear,
        };

        assert_eq!(grow.value_at(Duration::ZERO), 0.0);
        assert_eq!(grow.value_at(Duration::from_millis(350)), 2.5);
        assert_eq!(grow.value_at(Duration::from_secs(2)), 5.0);
        assert_eq!(grow.end(), Duration::from_millis(600));
    }

    #[test]
    fn test_cubic_in_out() {
        assert_eq!(Easing::CubicInOut.apply(0.0), 0.0);
        assert_eq!(Easing::CubicInOut.apply(0.5), 0.5);
        assert_eq!(Easing::CubicInOut.apply(1.0), 1.0);
        assert!(Easing::CubicInOut.apply(0.25) < 0.25);
    }

    #[test]
    fn test_path_length_of_line() {
        let commands = vec![PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(3.0, 4.0)];
        assert_eq!(path_length(&commands), 5.0);
    }
}
