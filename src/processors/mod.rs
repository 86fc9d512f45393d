pub mod aggregator;

pub use aggregator::{bucket_start, group_and_mean, group_and_mean_nested, Aggregator};
