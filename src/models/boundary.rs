use geo::{CoordsIter, MultiPolygon};

/// Longitude/latitude pair in degrees.
pub type LonLat = (f64, f64);

#[derive(Debug, Clone, PartialEq)]
pub struct CountryBoundary {
    /// Join key against `TemperatureRecord::country`.
    pub name: String,
    /// Polygons are promoted to a single-member multipolygon.
    pub geometry: MultiPolygon<f64>,
}

impl CountryBoundary {
    pub fn new(name: impl Into<String>, geometry: impl Into<MultiPolygon<f64>>) -> Self {
        Self {
            name: name.into(),
            geometry: geometry.into(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.geometry.coords_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    #[test]
    fn test_polygon_is_promoted() {
        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        let boundary = CountryBoundary::new("Squareland", square);

        assert_eq!(boundary.geometry.0.len(), 1);
        assert_eq!(boundary.point_count(), 4);
    }

    #[test]
    fn test_point_count_includes_holes() {
        let holed = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 9.0, y: 0.0), (x: 9.0, y: 9.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]]
        );
        let island = polygon![(x: 20.0, y: 20.0), (x: 21.0, y: 20.0), (x: 21.0, y: 21.0), (x: 20.0, y: 20.0)];
        let boundary = CountryBoundary::new("Lakeland", MultiPolygon::new(vec![holed, island]));

        assert_eq!(boundary.point_count(), 12);
    }
}
