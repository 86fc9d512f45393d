pub mod aggregates;
pub mod boundary;
pub mod temperature;

pub use aggregates::{
    CountryMean, CountryYearBucket, YearSlice, YearlyCountryAverage, YearlyGlobalAverage,
    YearlyMean,
};
pub use boundary::{CountryBoundary, LonLat};
pub use temperature::{RawTemperatureRow, TemperatureRecord};
