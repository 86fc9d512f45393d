use crate::error::{DashboardError, Result};
use crate::models::CountryBoundary;
use crate::readers::source::DataSource;
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use tracing::debug;

/// Immutable, shareable result of loading one boundary collection.
#[derive(Debug, Clone, Default)]
pub struct BoundaryDataset {
    pub source: String,
    pub features: Vec<CountryBoundary>,
}

impl BoundaryDataset {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CountryBoundary> {
        self.features.iter().find(|f| f.name == name)
    }
}

pub struct BoundaryReader {
    name_property: String,
}

impl BoundaryReader {
    pub fn new() -> Self {
        Self {
            name_property: "name".to_string(),
        }
    }

    pub fn with_name_property(name_property: impl Into<String>) -> Self {
        Self {
            name_property: name_property.into(),
        }
    }

    pub async fn load(&self, source: &DataSource) -> Result<BoundaryDataset> {
        let bytes = source
            .fetch()
            .await
            .map_err(|e| DashboardError::load_failure(source.key(), e))?;

        self.parse_slice(&bytes, &source.key())
            .map_err(|e| DashboardError::load_failure(source.key(), e))
    }

    pub fn parse_slice(&self, bytes: &[u8], origin: &str) -> Result<BoundaryDataset> {
        let collection = match serde_json::from_slice::<GeoJson>(bytes)? {
            GeoJson::FeatureCollection(collection) => collection,
            GeoJson::Feature(_) => {
                return Err(DashboardError::InvalidFormat(
                    "expected a FeatureCollection, found a Feature".to_string(),
                ))
            }
            GeoJson::Geometry(_) => {
                return Err(DashboardError::InvalidFormat(
                    "expected a FeatureCollection, found a bare Geometry".to_string(),
                ))
            }
        };

        let mut features = Vec::with_capacity(collection.features.len());
        let mut unsupported = 0usize;

        for feature in collection.features {
            let name = feature
                .property(&self.name_property)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            let Some(geometry) = feature.geometry else {
                unsupported += 1;
                continue;
            };
            let geometry: MultiPolygon<f64> = match Geometry::<f64>::try_from(geometry.value)? {
                Geometry::Polygon(polygon) => polygon.into(),
                Geometry::MultiPolygon(polygons) => polygons,
                _ => {
                    unsupported += 1;
                    continue;
                }
            };

            features.push(CountryBoundary::new(name, geometry));
        }

        debug!(
            origin,
            features = features.len(),
            points = features.iter().map(CountryBoundary::point_count).sum::<usize>(),
            unsupported,
            "parsed boundary collection"
        );

        Ok(BoundaryDataset {
            source: origin.to_string(),
            features,
        })
    }
}

impl Default for BoundaryReader {
    fn default() -> Self {
        Self::new()
    }
}
