use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Failed to load {origin}: {cause}")]
    LoadFailure {
        origin: String,
        #[source]
        cause: Box<DashboardError>,
    },

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DashboardError {
    /// Wrap an error with the source it was raised for.
    pub fn load_failure(origin: impl Into<String>, cause: DashboardError) -> Self {
        match cause {
            already @ DashboardError::LoadFailure { .. } => already,
            cause => DashboardError::LoadFailure {
                origin: origin.into(),
                cause: Box::new(cause),
            },
        }
    }

    pub fn is_load_failure(&self) -> bool {
        matches!(self, DashboardError::LoadFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_names_origin() {
        let err = DashboardError::load_failure(
            "data/missing.csv",
            DashboardError::MissingData("no rows".to_string()),
        );

        assert!(err.is_load_failure());
        assert_eq!(
            err.to_string(),
            "Failed to load data/missing.csv: Missing required data: no rows"
        );
    }

    #[test]
    fn test_load_failure_is_not_nested() {
        let inner = DashboardError::load_failure("a.csv", DashboardError::InvalidFormat("x".into()));
        let outer = DashboardError::load_failure("b.csv", inner);

        match outer {
            DashboardError::LoadFailure { origin, .. } => assert_eq!(origin, "a.csv"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
