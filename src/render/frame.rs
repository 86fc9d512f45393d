use crate::render::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Outer chart size and the margins reserved for axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl ChartFrame {
    pub fn new(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            width,
            height,
            margins,
        }
    }

    /// Plot area width.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Plot area height.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.width, self.height).with_origin(self.margins.left, self.margins.top)
    }
}
