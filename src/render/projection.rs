use crate::models::LonLat;
use geo::{Coord, MapCoords, MultiPolygon};

/// Plate carrée projection from degrees onto pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equirectangular {
    scale: f64,
    translate: (f64, f64),
}

impl Equirectangular {
    pub fn new(scale: f64, translate: (f64, f64)) -> Self {
        Self { scale, translate }
    }

    /// Whole world spanning `width`, centred in the frame.
    pub fn fit_width(width: f64, height: f64) -> Self {
        Self::new(width / (2.0 * std::f64::consts::PI), (width / 2.0, height / 2.0))
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn project(&self, (lon, lat): LonLat) -> (f64, f64) {
        (
            self.translate.0 + self.scale * lon.to_radians(),
            self.translate.1 - self.scale * lat.to_radians(),
        )
    }

    /// The geometry in pixel space.
    pub fn region(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        geometry.map_coords(|Coord { x, y }| {
            let (px, py) = self.project((x, y));
            Coord { x: px, y: py }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_world_spans_width() {
        let projection = Equirectangular::fit_width(1200.0, 800.0);

        let (x0, y0) = projection.project((-180.0, 0.0));
        let (x1, _) = projection.project((180.0, 0.0));
        assert!(x0.abs() < 1e-9);
        assert!((x1 - 1200.0).abs() < 1e-9);
        assert_eq!(y0, 400.0);

        let (_, north) = projection.project((0.0, 90.0));
        assert!((north - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_projects_every_coordinate() {
        let projection = Equirectangular::fit_width(360.0, 180.0);
        let geometry: MultiPolygon<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)].into();

        let region = projection.region(&geometry);
        let ring: Vec<(f64, f64)> = region.0[0].exterior().points().map(|p| p.x_y()).collect();
        let expected: Vec<(f64, f64)> = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]
            .into_iter()
            .map(|p| projection.project(p))
            .collect();
        assert_eq!(ring, expected);
    }
}
