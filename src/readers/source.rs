use crate::error::{DashboardError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Where a dataset comes from: a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    /// Cache key; two sources with the same key share one load.
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Url(_))
    }

    /// Fetch the raw bytes of the source.
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            DataSource::File(path) => tokio::fs::read(path).await?,
            DataSource::Url(url) => {
                let response = reqwest::get(url).await?.error_for_status()?;
                response.bytes().await?.to_vec()
            }
        };

        debug!(source = %self, bytes = bytes.len(), "fetched source");

        if bytes.is_empty() {
            return Err(DashboardError::MissingData(format!("{} is empty", self)));
        }

        Ok(bytes)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

impl From<&str> for DataSource {
    fn from(location: &str) -> Self {
        DataSource::parse(location)
    }
}

/// Decode text as UTF-8 (BOM aware), falling back to Windows-1252.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}
