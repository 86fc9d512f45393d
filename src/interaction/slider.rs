/// Range input bounded to the years present in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSlider {
    min: i32,
    max: i32,
    value: i32,
}

impl YearSlider {
    /// Bounds from the first and last of `years`, starting at `initial`.
    ///
    /// Returns `None` when there are no years.
    pub fn new(years: &[i32], initial: i32) -> Option<Self> {
        let min = *years.iter().min()?;
        let max = *years.iter().max()?;
        Some(Self {
            min,
            max,
            value: initial.clamp(min, max),
        })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Move the thumb, clamped to the bounds; returns the resulting year.
    pub fn input(&mut self, year: i32) -> i32 {
        self.value = year.clamp(self.min, self.max);
        self.value
    }
}
