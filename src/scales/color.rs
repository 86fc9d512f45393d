use crate::utils::constants::{COLOR_DOMAIN_COLD, COLOR_DOMAIN_HOT};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The 11-class RdYlBu diverging scheme, red end first.
pub const RD_YL_BU: [Rgb; 11] = [
    Rgb::new(0xa5, 0x00, 0x26),
    Rgb::new(0xd7, 0x30, 0x27),
    Rgb::new(0xf4, 0x6d, 0x43),
    Rgb::new(0xfd, 0xae, 0x61),
    Rgb::new(0xfe, 0xe0, 0x90),
    Rgb::new(0xff, 0xff, 0xbf),
    Rgb::new(0xe0, 0xf3, 0xf8),
    Rgb::new(0xab, 0xd9, 0xe9),
    Rgb::new(0x74, 0xad, 0xd1),
    Rgb::new(0x45, 0x75, 0xb4),
    Rgb::new(0x31, 0x36, 0x95),
];

/// Uniform cubic B-spline weight for one channel.
fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn basis_channel(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t <= 0.0 {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };

    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };

    basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

/// Smooth interpolation through a color scheme, `t` clamped to [0, 1].
pub fn interpolate_scheme(scheme: &[Rgb], t: f64) -> Rgb {
    let channel = |pick: fn(&Rgb) -> u8| {
        let values: Vec<f64> = scheme.iter().map(|c| pick(c) as f64).collect();
        basis_channel(&values, t).round().clamp(0.0, 255.0) as u8
    };

    Rgb::new(channel(|c| c.r), channel(|c| c.g), channel(|c| c.b))
}

/// Sequential temperature → color mapping.
///
/// The default domain runs from 40 to −10 degrees, so the hottest values
/// take the red end of RdYlBu and the coldest the blue end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    domain: (f64, f64),
}

impl ColorScale {
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    pub fn temperature() -> Self {
        Self::new((COLOR_DOMAIN_HOT, COLOR_DOMAIN_COLD))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn color(&self, temperature: f64) -> Rgb {
        let (d0, d1) = self.domain;
        let t = if d1 == d0 {
            0.5
        } else {
            (temperature - d0) / (d1 - d0)
        };
        interpolate_scheme(&RD_YL_BU, t)
    }

    /// `steps` colors sampled evenly from the first to the last domain value.
    pub fn ramp(&self, steps: usize) -> Vec<Rgb> {
        let (d0, d1) = self.domain;
        match steps {
            0 => Vec::new(),
            1 => vec![self.color(d0)],
            _ => (0..steps)
                .map(|i| self.color(d0 + (d1 - d0) * i as f64 / (steps - 1) as f64))
                .collect(),
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::temperature()
    }
}
