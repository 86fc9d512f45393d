use crate::models::{
    CountryYearBucket, TemperatureRecord, YearlyCountryAverage, YearlyGlobalAverage, YearlyMean,
};
use crate::utils::constants::BUCKET_WIDTH_YEARS;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Running sum over the valid readings of one group.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Group records by `key` and average their valid temperatures.
///
/// Groups without a single valid reading are absent from the result.
pub fn group_and_mean<'a, I, K, F>(records: I, key: F) -> HashMap<K, f64>
where
    I: IntoIterator<Item = &'a TemperatureRecord>,
    K: Eq + Hash,
    F: Fn(&TemperatureRecord) -> K,
{
    let mut groups: HashMap<K, MeanAccumulator> = HashMap::new();

    for record in records {
        groups
            .entry(key(record))
            .or_default()
            .push(record.average_temperature);
    }

    groups
        .into_iter()
        .filter_map(|(k, acc)| acc.mean().map(|mean| (k, mean)))
        .collect()
}

/// Two-level variant of [`group_and_mean`]: outer key, then inner key.
pub fn group_and_mean_nested<'a, I, K1, K2, F1, F2>(
    records: I,
    outer: F1,
    inner: F2,
) -> HashMap<K1, HashMap<K2, f64>>
where
    I: IntoIterator<Item = &'a TemperatureRecord>,
    K1: Eq + Hash,
    K2: Eq + Hash,
    F1: Fn(&TemperatureRecord) -> K1,
    F2: Fn(&TemperatureRecord) -> K2,
{
    let mut groups: HashMap<K1, HashMap<K2, MeanAccumulator>> = HashMap::new();

    for record in records {
        groups
            .entry(outer(record))
            .or_default()
            .entry(inner(record))
            .or_default()
            .push(record.average_temperature);
    }

    groups
        .into_iter()
        .map(|(k1, inner_groups)| {
            let means: HashMap<K2, f64> = inner_groups
                .into_iter()
                .filter_map(|(k2, acc)| acc.mean().map(|mean| (k2, mean)))
                .collect();
            (k1, means)
        })
        .filter(|(_, means)| !means.is_empty())
        .collect()
}

/// First year of the fixed-width bucket containing `year`.
pub fn bucket_start(year: i32, width: i32) -> i32 {
    year.div_euclid(width) * width
}

pub struct Aggregator {
    bucket_width: i32,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            bucket_width: BUCKET_WIDTH_YEARS,
        }
    }

    /// Mean temperature per year and country.
    pub fn yearly_country_average(&self, records: &[TemperatureRecord]) -> YearlyCountryAverage {
        let nested = group_and_mean_nested(records, |r| r.derived_year, |r| r.country.clone());
        let averages = YearlyCountryAverage::from_nested(nested);

        debug!(years = averages.len(), "aggregated yearly country averages");
        averages
    }

    /// Mean temperature per year across all countries, ordered by year.
    pub fn yearly_global_average(&self, records: &[TemperatureRecord]) -> YearlyGlobalAverage {
        let mut series: Vec<YearlyMean> = group_and_mean(records, |r| r.derived_year)
            .into_iter()
            .map(|(year, temperature)| YearlyMean { year, temperature })
            .collect();
        series.sort_by_key(|point| point.year);

        debug!(points = series.len(), "aggregated yearly global average");
        series
    }

    /// One country's records averaged per bucket, ordered by bucket start.
    pub fn country_year_buckets(
        &self,
        records: &[TemperatureRecord],
        country: &str,
    ) -> Vec<CountryYearBucket> {
        let width = self.bucket_width;
        let matching = records.iter().filter(|r| r.is_country(country));

        let mut buckets: Vec<CountryYearBucket> =
            group_and_mean(matching, |r| bucket_start(r.derived_year, width))
                .into_iter()
                .map(|(bucket_start, temperature)| CountryYearBucket {
                    bucket_start,
                    temperature,
                })
                .collect();
        buckets.sort_by_key(|bucket| bucket.bucket_start);

        debug!(country, buckets = buckets.len(), "bucketed country records");
        buckets
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
