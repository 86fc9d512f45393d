use crate::render::surface::PathCommand;

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at an interior point from its two neighbouring secants.
fn interior_slope(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    if h0 == 0.0 || h1 == 0.0 || h0 + h1 == 0.0 {
        return 0.0;
    }
    let s0 = (p1.1 - p0.1) / h0;
    let s1 = (p2.1 - p1.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

/// Tangent at an end point given the tangent at its neighbour.
fn end_slope(p0: (f64, f64), p1: (f64, f64), neighbour: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (p1.1 - p0.1) / h - neighbour) / 2.0
    }
}

/// Cubic path through `points` that is monotone in y wherever the data is,
/// assuming x is strictly increasing.
pub fn monotone_x(points: &[(f64, f64)]) -> Vec<PathCommand> {
    let n = points.len();
    let Some(&(x0, y0)) = points.first() else {
        return Vec::new();
    };

    let mut commands = vec![PathCommand::MoveTo(x0, y0)];
    if n == 2 {
        commands.push(PathCommand::LineTo(points[1].0, points[1].1));
    }
    if n < 3 {
        return commands;
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_slope(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_slope(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_slope(points[n - 2], points[n - 1], tangents[n - 2]);

    for i in 0..n - 1 {
        let (xa, ya) = points[i];
        let (xb, yb) = points[i + 1];
        let dx = (xb - xa) / 3.0;
        commands.push(PathCommand::CubicTo(
            xa + dx,
            ya + dx * tangents[i],
            xb - dx,
            yb - dx * tangents[i + 1],
            xb,
            yb,
        ));
    }
    commands
}
