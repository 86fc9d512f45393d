use crate::error::Result;
use crate::readers::{BoundaryDataset, BoundaryReader, DataSource, TemperatureDataset, TemperatureReader};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

/// Load-once cache keyed by source.
///
/// Concurrent requests for the same key wait on a single load and receive the
/// same `Arc`. A failed load leaves the slot empty.
pub struct SourceCache<T> {
    slots: Mutex<HashMap<String, Arc<OnceCell<Arc<T>>>>>,
}

impl<T> SourceCache<T> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_or_load<F, Fut>(&self, source: &DataSource, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(source.key()).or_default().clone()
        };

        let value = slot
            .get_or_try_init(|| async move {
                debug!(source = %source, "cache miss");
                load().await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(value))
    }

    /// Number of sources that have finished loading.
    pub async fn loaded(&self) -> usize {
        let slots = self.slots.lock().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }
}

impl<T> Default for SourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads temperature tables and boundary collections through shared caches.
pub struct ConcurrentReader {
    temperatures: SourceCache<TemperatureDataset>,
    boundaries: SourceCache<BoundaryDataset>,
}

impl ConcurrentReader {
    pub fn new() -> Self {
        Self {
            temperatures: SourceCache::new(),
            boundaries: SourceCache::new(),
        }
    }

    pub async fn temperatures(&self, source: &DataSource) -> Result<Arc<TemperatureDataset>> {
        self.temperatures
            .get_or_load(source, || async {
                let dataset = TemperatureReader::new().load(source).await?;
                info!(
                    source = %source,
                    records = dataset.len(),
                    skipped = dataset.skipped_rows,
                    "loaded temperature table"
                );
                Ok(dataset)
            })
            .await
    }

    pub async fn boundaries(&self, source: &DataSource) -> Result<Arc<BoundaryDataset>> {
        self.boundaries
            .get_or_load(source, || async {
                let dataset = BoundaryReader::new().load(source).await?;
                info!(source = %source, features = dataset.len(), "loaded boundaries");
                Ok(dataset)
            })
            .await
    }

    /// Load the map inputs jointly; fails if either source fails.
    pub async fn read_map_inputs(
        &self,
        temperature_source: &DataSource,
        boundary_source: &DataSource,
    ) -> Result<MapInputs> {
        let (temperatures, boundaries) = tokio::try_join!(
            self.temperatures(temperature_source),
            self.boundaries(boundary_source)
        )?;

        Ok(MapInputs {
            temperatures,
            boundaries,
        })
    }

    pub async fn loaded_sources(&self) -> usize {
        self.temperatures.loaded().await + self.boundaries.loaded().await
    }
}

impl Default for ConcurrentReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Both datasets the map needs, available only together.
#[derive(Debug, Clone)]
pub struct MapInputs {
    pub temperatures: Arc<TemperatureDataset>,
    pub boundaries: Arc<BoundaryDataset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::NamedTempFile;

    fn csv_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "dt,Country,AverageTemperature").unwrap();
        writeln!(file, "2000-01-01,A,10").unwrap();
        file
    }

    #[tokio::test]
    async fn test_cache_loads_once() {
        let cache: SourceCache<usize> = SourceCache::new();
        let calls = AtomicUsize::new(0);
        let source = DataSource::parse("memory://counter");

        for _ in 0..3 {
            let value = cache
                .get_or_load(&source, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42usize)
                })
                .await
                .unwrap();
            assert_eq!(*value, 42);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.loaded().await, 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache: SourceCache<usize> = SourceCache::new();
        let source = DataSource::parse("memory://flaky");

        let first = cache
            .get_or_load(&source, || async {
                Err(crate::error::DashboardError::MissingData("nope".into()))
            })
            .await;
        assert!(first.is_err());
        assert_eq!(cache.loaded().await, 0);

        let second = cache.get_or_load(&source, || async { Ok(7usize) }).await;
        assert_eq!(*second.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_same_path_shares_dataset() {
        let file = csv_file();
        let source = DataSource::File(file.path().to_path_buf());
        let reader = ConcurrentReader::new();

        let (a, b) = tokio::join!(reader.temperatures(&source), reader.temperatures(&source));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(reader.loaded_sources().await, 1);
    }

    #[tokio::test]
    async fn test_map_inputs_are_all_or_nothing() {
        let file = csv_file();
        let temperatures = DataSource::File(file.path().to_path_buf());
        let boundaries = DataSource::parse("missing/world.geojson");

        let reader = ConcurrentReader::new();
        let result = reader.read_map_inputs(&temperatures, &boundaries).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().is_load_failure());
    }
}
