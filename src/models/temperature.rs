use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// A row as it appears in the source table. Unknown columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTemperatureRow {
    #[serde(rename = "dt")]
    pub dt: String,

    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "AverageTemperature", default)]
    pub average_temperature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub date: NaiveDate,
    pub country: String,
    /// `None` when the source value was empty or not a finite number.
    pub average_temperature: Option<f64>,
    pub derived_year: i32,
}

impl TemperatureRecord {
    pub fn new(date: NaiveDate, country: String, average_temperature: Option<f64>) -> Self {
        Self {
            derived_year: date.year(),
            date,
            country,
            average_temperature,
        }
    }

    pub fn from_raw(raw: RawTemperatureRow) -> Result<Self> {
        let date = parse_date(&raw.dt)?;
        let temperature = parse_temperature(&raw.average_temperature);
        Ok(Self::new(date, raw.country.trim().to_string(), temperature))
    }

    pub fn has_temperature(&self) -> bool {
        self.average_temperature.is_some()
    }

    pub fn is_country(&self, country: &str) -> bool {
        self.country == country
    }
}

/// Parse the date-like `dt` column.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, RFC 3339 timestamps, naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps and a bare four-digit year.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y/%m/%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(timestamp.date());
    }
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        let year = value
            .parse::<i32>()
            .map_err(|_| DashboardError::InvalidFormat(format!("Invalid year: '{}'", value)))?;
        return NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| DashboardError::InvalidFormat(format!("Invalid year: '{}'", value)));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(DashboardError::from)
}

/// Coerce a temperature cell to a float; empty and non-finite values are absent.
pub fn parse_temperature(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    value.parse::<f64>().ok().filter(|t| t.is_finite())
}
