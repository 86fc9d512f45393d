/// Maps discrete categories onto evenly spaced bands of a pixel range.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<T> {
    domain: Vec<T>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl<T: PartialEq + Clone> BandScale<T> {
    pub fn new(domain: Vec<T>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Set inner and outer padding together, as a fraction of the step.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.domain.len() as f64;
        (r1 - r0).abs() / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `value`, or `None` if it is not in the domain.
    pub fn position(&self, value: &T) -> Option<f64> {
        let index = self.domain.iter().position(|d| d == value)?;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let step = self.step();
        let n = self.domain.len() as f64;
        let first = start + (stop - start - step * (n - self.padding_inner)) * self.align;

        let offset = if r1 < r0 {
            n - 1.0 - index as f64
        } else {
            index as f64
        };
        Some(first + step * offset)
    }

    /// Centre of the band for `value`.
    pub fn center(&self, value: &T) -> Option<f64> {
        self.position(value).map(|x| x + self.bandwidth() / 2.0)
    }
}
