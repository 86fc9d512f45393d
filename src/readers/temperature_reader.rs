use crate::error::{DashboardError, Result};
use crate::models::{RawTemperatureRow, TemperatureRecord};
use crate::readers::source::{decode_text, DataSource};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Immutable, shareable result of loading one temperature table.
#[derive(Debug, Clone, Default)]
pub struct TemperatureDataset {
    pub source: String,
    pub records: Vec<TemperatureRecord>,
    /// Rows dropped because they were malformed or their date could not be parsed.
    pub skipped_rows: usize,
}

impl TemperatureDataset {
    pub fn new(source: impl Into<String>, records: Vec<TemperatureRecord>) -> Self {
        Self {
            source: source.into(),
            records,
            skipped_rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose temperature cell was empty or unparsable.
    pub fn missing_temperatures(&self) -> usize {
        self.records.iter().filter(|r| !r.has_temperature()).count()
    }

    /// Distinct countries in order of first appearance.
    pub fn countries(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.clone())
            .collect()
    }
}

pub struct TemperatureReader {
    has_headers: bool,
}

impl TemperatureReader {
    pub fn new() -> Self {
        Self { has_headers: true }
    }

    /// Fetch and parse a temperature table from any source.
    pub async fn load(&self, source: &DataSource) -> Result<TemperatureDataset> {
        let bytes = source
            .fetch()
            .await
            .map_err(|e| DashboardError::load_failure(source.key(), e))?;
        let text = decode_text(&bytes);

        self.parse_str(&text, &source.key())
            .map_err(|e| DashboardError::load_failure(source.key(), e))
    }

    pub fn parse_str(&self, text: &str, origin: &str) -> Result<TemperatureDataset> {
        let csv_reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        self.collect(csv_reader, origin)
    }

    fn collect<R: std::io::Read>(
        &self,
        mut csv_reader: csv::Reader<R>,
        origin: &str,
    ) -> Result<TemperatureDataset> {
        let mut records = Vec::new();
        let mut skipped_rows = 0;

        for (row_index, row) in csv_reader.deserialize::<RawTemperatureRow>().enumerate() {
            match row.map_err(DashboardError::from).and_then(TemperatureRecord::from_raw) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped_rows += 1;
                    // Report the first few; the total is logged below
                    if skipped_rows <= 5 {
                        warn!(origin, row = row_index + 1, error = %e, "skipping row");
                    }
                }
            }
        }

        if records.is_empty() {
            return Err(DashboardError::MissingData(format!(
                "no usable rows in {}",
                origin
            )));
        }

        debug!(origin, records = records.len(), skipped_rows, "parsed temperature table");

        Ok(TemperatureDataset {
            source: origin.to_string(),
            records,
            skipped_rows,
        })
    }
}

impl Default for TemperatureReader {
    fn default() -> Self {
        Self::new()
    }
}
