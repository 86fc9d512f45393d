use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Mean temperature of one country in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMean {
    pub country: String,
    pub temperature: f64,
}

/// Year → country → mean temperature.
///
/// Only groups with at least one valid reading are present, so a year key
/// always carries at least one country.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyCountryAverage {
    years: BTreeMap<i32, HashMap<String, f64>>,
}

impl YearlyCountryAverage {
    pub fn from_nested(nested: HashMap<i32, HashMap<String, f64>>) -> Self {
        Self {
            years: nested
                .into_iter()
                .filter(|(_, countries)| !countries.is_empty())
                .collect(),
        }
    }

    /// Years present in the data, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = self.years.keys().next()?;
        let last = self.years.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    pub fn get(&self, year: i32, country: &str) -> Option<f64> {
        self.years.get(&year)?.get(country).copied()
    }

    /// Country means for one year; empty when the year has no data.
    pub fn slice(&self, year: i32) -> YearSlice {
        let means = self.years.get(&year).cloned().unwrap_or_default();
        YearSlice { year, means }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// The per-country means drawn on the map for the selected year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearSlice {
    pub year: i32,
    means: HashMap<String, f64>,
}

impl YearSlice {
    pub fn new(year: i32, entries: impl IntoIterator<Item = CountryMean>) -> Self {
        Self {
            year,
            means: entries
                .into_iter()
                .map(|entry| (entry.country, entry.temperature))
                .collect(),
        }
    }

    pub fn temperature(&self, country: &str) -> Option<f64> {
        self.means.get(country).copied()
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Entries sorted by country name.
    pub fn entries(&self) -> Vec<CountryMean> {
        let mut entries: Vec<CountryMean> = self
            .means
            .iter()
            .map(|(country, temperature)| CountryMean {
                country: country.clone(),
                temperature: *temperature,
            })
            .collect();
        entries.sort_by(|a, b| a.country.cmp(&b.country));
        entries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyMean {
    pub year: i32,
    pub temperature: f64,
}

/// One point per year, ordered by year.
pub type YearlyGlobalAverage = Vec<YearlyMean>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountryYearBucket {
    pub bucket_start: i32,
    pub temperature: f64,
}
