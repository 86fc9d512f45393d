use crate::models::YearSlice;
use crate::readers::BoundaryDataset;
use crate::render::projection::Equirectangular;
use crate::render::surface::{Geometry, HoverBinding, Shape, Style, Surface};
use crate::scales::ColorScale;
use crate::utils::constants::{BORDER_COLOR, MAP_TOOLTIP_OFFSET, NO_DATA_COLOR};
use tracing::debug;

pub const COUNTRY_CLASS: &str = "country";

/// How many drawn features matched a temperature entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapStats {
    pub features: usize,
    pub with_data: usize,
}

/// Draws boundary features filled by their mean temperature.
#[derive(Debug, Clone)]
pub struct MapRenderer {
    width: f64,
    height: f64,
    projection: Equirectangular,
    color: ColorScale,
}

impl MapRenderer {
    pub fn new(width: f64, height: f64, color: ColorScale) -> Self {
        Self {
            width,
            height,
            projection: Equirectangular::fit_width(width, height),
            color,
        }
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.width, self.height)
    }

    pub fn fill_for(&self, temperature: Option<f64>) -> String {
        match temperature {
            Some(t) => self.color.color(t).to_string(),
            None => NO_DATA_COLOR.to_string(),
        }
    }

    /// Replace the surface contents with one path per feature.
    pub fn draw(&self, surface: &mut Surface, slice: &YearSlice, boundaries: &BoundaryDataset) -> MapStats {
        surface.clear();
        let mut stats = MapStats::default();

        for feature in &boundaries.features {
            let temperature = slice.temperature(&feature.name);
            let label = match temperature {
                Some(t) => format!("{}: {:.2}°C", feature.name, t),
                None => format!("{}: No data", feature.name),
            };

            let style = Style::fill(self.fill_for(temperature)).with_stroke(BORDER_COLOR, 0.5);
            let shape = Shape::new(
                COUNTRY_CLASS,
                Geometry::Region(self.projection.region(&feature.geometry)),
                style,
            )
            .with_hover(HoverBinding::new(label, MAP_TOOLTIP_OFFSET).following());
            surface.add(shape);

            stats.features += 1;
            if temperature.is_some() {
                stats.with_data += 1;
            }
        }

        debug!(
            year = slice.year,
            features = stats.features,
            with_data = stats.with_data,
            "drew map"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryBoundary, CountryMean};
    use geo::polygon;

    fn boundaries() -> BoundaryDataset {
        let square = |x: f64| {
            polygon![
                (x: x, y: 0.0),
                (x: x + 10.0, y: 0.0),
                (x: x + 10.0, y: 10.0),
                (x: x, y: 10.0)
            ]
        };
        BoundaryDataset {
            source: "world.geojson".to_string(),
            features: vec![
                CountryBoundary::new("France", square(0.0)),
                CountryBoundary::new("Atlantis", square(40.0)),
            ],
        }
    }

    fn slice() -> YearSlice {
        YearSlice::new(
            2000,
            vec![CountryMean {
                country: "France".to_string(),
                temperature: 40.0,
            }],
        )
    }

    #[test]
    fn test_fill_uses_color_or_fallback() {
        let renderer = MapRenderer::new(1200.0, 800.0, ColorScale::temperature());
        let mut surface = renderer.surface();
        let stats = renderer.draw(&mut surface, &slice(), &boundaries());

        assert_eq!(stats, MapStats { features: 2, with_data: 1 });
        let fills: Vec<_> = surface
            .by_class(COUNTRY_CLASS)
            .map(|s| s.style.fill.clone().unwrap_or_default())
            .collect();
        assert_eq!(fills, vec!["rgb(165, 0, 38)".to_string(), "#ccc".to_string()]);
    }

    #[test]
    fn test_redraw_does_not_accumulate() {
        let renderer = MapRenderer::new(1200.0, 800.0, ColorScale::temperature());
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &slice(), &boundaries());
        renderer.draw(&mut surface, &slice(), &boundaries());

        assert_eq!(surface.count(COUNTRY_CLASS), 2);
    }

    #[test]
    fn test_year_without_data_is_all_fallback() {
        let renderer = MapRenderer::new(1200.0, 800.0, ColorScale::temperature());
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &YearSlice::new(1500, Vec::new()), &boundaries());

        assert!(surface
            .by_class(COUNTRY_CLASS)
            .all(|s| s.style.fill.as_deref() == Some(NO_DATA_COLOR)));
    }

    #[test]
    fn test_hover_labels() {
        let renderer = MapRenderer::new(360.0, 180.0, ColorScale::temperature());
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &slice(), &boundaries());

        let projection = Equirectangular::fit_width(360.0, 180.0);
        let (x, y) = projection.project((5.0, 5.0));
        let hit = surface.hit_test(x, y).and_then(|s| s.hover.clone());
        assert_eq!(hit.map(|h| h.content), Some("France: 40.00°C".to_string()));

        let (x, y) = projection.project((45.0, 5.0));
        let hit = surface.hit_test(x, y).and_then(|s| s.hover.clone());
        assert_eq!(hit.map(|h| h.content), Some("Atlantis: No data".to_string()));
    }
}
