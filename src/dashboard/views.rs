//! Interactive state of each chart: its data, controls and drawn surface.

use crate::error::{DashboardError, Result};
use crate::interaction::{dispatch, CountrySelect, PointerEvent, Tooltip, YearSlider};
use crate::models::{CountryYearBucket, YearlyCountryAverage, YearlyGlobalAverage};
use crate::processors::Aggregator;
use crate::readers::{BoundaryDataset, TemperatureDataset};
use crate::render::{
    AnimatedTrendRenderer, BarRenderer, MapRenderer, MapStats, Surface, Timeline, TrendRenderer,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Year to show first: `preferred` when it has data, else the earliest year.
pub fn initial_year(averages: &YearlyCountryAverage, preferred: i32) -> Option<i32> {
    if averages.contains_year(preferred) {
        Some(preferred)
    } else {
        averages.year_range().map(|(first, _)| first)
    }
}

pub struct MapView {
    renderer: MapRenderer,
    averages: YearlyCountryAverage,
    boundaries: Arc<BoundaryDataset>,
    slider: YearSlider,
    surface: Surface,
    tooltip: Tooltip,
    stats: MapStats,
}

impl MapView {
    pub fn new(
        renderer: MapRenderer,
        averages: YearlyCountryAverage,
        boundaries: Arc<BoundaryDataset>,
        preferred_year: i32,
    ) -> Result<Self> {
        let year = initial_year(&averages, preferred_year).ok_or_else(|| {
            DashboardError::MissingData("no year has a valid temperature".to_string())
        })?;
        if year != preferred_year {
            warn!(preferred_year, year, "initial year has no data, showing earliest year");
        }
        let slider = YearSlider::new(&averages.years(), year).ok_or_else(|| {
            DashboardError::MissingData("no years for the slider".to_string())
        })?;

        let mut surface = renderer.surface();
        let stats = renderer.draw(&mut surface, &averages.slice(year), &boundaries);

        Ok(Self {
            renderer,
            averages,
            boundaries,
            slider,
            surface,
            tooltip: Tooltip::new(),
            stats,
        })
    }

    pub fn year(&self) -> i32 {
        self.slider.value()
    }

    pub fn slider(&self) -> &YearSlider {
        &self.slider
    }

    pub fn averages(&self) -> &YearlyCountryAverage {
        &self.averages
    }

    pub fn boundaries(&self) -> &BoundaryDataset {
        &self.boundaries
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn stats(&self) -> MapStats {
        self.stats
    }

    /// Slider input: clamp, then redraw for the resulting year.
    pub fn set_year(&mut self, year: i32) -> MapStats {
        let year = self.slider.input(year);
        self.tooltip.hide();
        self.stats = self
            .renderer
            .draw(&mut self.surface, &self.averages.slice(year), &self.boundaries);
        self.stats
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        dispatch(&self.surface, &mut self.tooltip, event)
    }

    /// Temperature of every feature, in feature order, for each year.
    pub fn year_table(&self) -> Vec<(i32, Vec<Option<f64>>)> {
        self.averages
            .years()
            .into_iter()
            .map(|year| {
                let slice = self.averages.slice(year);
                let temps = self
                    .boundaries
                    .features
                    .iter()
                    .map(|f| slice.temperature(&f.name))
                    .collect();
                (year, temps)
            })
            .collect()
    }
}

pub struct LineView {
    series: YearlyGlobalAverage,
    surface: Surface,
    tooltip: Tooltip,
}

impl LineView {
    pub fn new(renderer: &TrendRenderer, dataset: &TemperatureDataset) -> Self {
        let series = Aggregator::new().yearly_global_average(&dataset.records);
        let mut surface = renderer.surface();
        renderer.draw(&mut surface, &series);

        Self {
            series,
            surface,
            tooltip: Tooltip::new(),
        }
    }

    pub fn series(&self) -> &YearlyGlobalAverage {
        &self.series
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        dispatch(&self.surface, &mut self.tooltip, event)
    }
}

pub struct ScatterView {
    renderer: AnimatedTrendRenderer,
    series: YearlyGlobalAverage,
    surface: Surface,
    tooltip: Tooltip,
    timeline: Timeline,
}

impl ScatterView {
    pub fn new(renderer: AnimatedTrendRenderer, dataset: &TemperatureDataset) -> Self {
        let series = Aggregator::new().yearly_global_average(&dataset.records);
        let mut surface = renderer.surface();
        let timeline = renderer.draw(&mut surface, &series);

        Self {
            renderer,
            series,
            surface,
            tooltip: Tooltip::new(),
            timeline,
        }
    }

    pub fn series(&self) -> &YearlyGlobalAverage {
        &self.series
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Redraw from scratch, restarting the animation.
    pub fn redraw(&mut self) -> Timeline {
        self.tooltip.hide();
        self.timeline = self.renderer.draw(&mut self.surface, &self.series);
        self.timeline.clone()
    }

    /// Advance the current animation to `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.timeline.apply(&mut self.surface, elapsed)
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        dispatch(&self.surface, &mut self.tooltip, event)
    }
}

pub struct BarView {
    renderer: BarRenderer,
    aggregator: Aggregator,
    dataset: Arc<TemperatureDataset>,
    select: CountrySelect,
    buckets: Vec<CountryYearBucket>,
    surface: Surface,
    tooltip: Tooltip,
}

impl BarView {
    pub fn new(renderer: BarRenderer, dataset: Arc<TemperatureDataset>) -> Self {
        let select = CountrySelect::new(dataset.countries());
        let surface = renderer.surface();
        let mut view = Self {
            renderer,
            aggregator: Aggregator::new(),
            dataset,
            select,
            buckets: Vec::new(),
            surface,
            tooltip: Tooltip::new(),
        };
        if let Some(first) = view.select.selected().map(str::to_string) {
            view.select(&first);
        }
        view
    }

    pub fn countries(&self) -> &[String] {
        self.select.options()
    }

    pub fn selected(&self) -> Option<&str> {
        self.select.selected()
    }

    pub fn buckets(&self) -> &[CountryYearBucket] {
        &self.buckets
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Change the selected country and redraw; returns the number of bars.
    pub fn select(&mut self, country: &str) -> usize {
        if !self.select.select(country) {
            warn!(country, "country not present in chart data");
        }
        self.tooltip.hide();
        self.buckets = self
            .aggregator
            .country_year_buckets(&self.dataset.records, country);
        let bars = self.renderer.draw(&mut self.surface, &self.buckets);
        debug!(country, bars, "selected country");
        bars
    }

    /// Bar chart SVG for every listed country, in option order.
    pub fn render_all(&self) -> Vec<(String, String)> {
        let mut scratch = self.renderer.surface();
        self.select
            .options()
            .iter()
            .map(|country| {
                let buckets = self
                    .aggregator
                    .country_year_buckets(&self.dataset.records, country);
                self.renderer.draw(&mut scratch, &buckets);
                (country.clone(), scratch.to_svg())
            })
            .collect()
    }

    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        dispatch(&self.surface, &mut self.tooltip, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryBoundary, TemperatureRecord};
    use crate::render::bars::BAR_CLASS;
    use crate::render::map::COUNTRY_CLASS;
    use crate::scales::ColorScale;
    use chrono::NaiveDate;
    use geo::polygon;

    fn record(date: &str, country: &str, temperature: Option<f64>) -> TemperatureRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        TemperatureRecord::new(date, country.to_string(), temperature)
    }

    fn dataset() -> Arc<TemperatureDataset> {
        Arc::new(TemperatureDataset::new(
            "test.csv",
            vec![
                record("1750-01-01", "France", Some(10.0)),
                record("1801-01-01", "France", Some(12.0)),
                record("1999-01-01", "Norway", Some(2.0)),
                record("2000-01-01", "France", Some(14.0)),
            ],
        ))
    }

    fn boundaries() -> Arc<BoundaryDataset> {
        let square = geo::polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0)
        ];
        Arc::new(BoundaryDataset {
            source: "world.geojson".to_string(),
            features: vec![
                CountryBoundary::new("France", square.clone()),
                CountryBoundary::new("Norway", square),
            ],
        })
    }

    fn map_view(preferred: i32) -> MapView {
        let averages = Aggregator::new().yearly_country_average(&dataset().records);
        MapView::new(
            MapRenderer::new(1200.0, 800.0, ColorScale::temperature()),
            averages,
            boundaries(),
            preferred,
        )
        .unwrap()
    }

    #[test]
    fn test_map_starts_at_preferred_year() {
        let view = map_view(2000);
        assert_eq!(view.year(), 2000);
        assert_eq!((view.slider().min(), view.slider().max()), (1750, 2000));
        assert_eq!(view.stats().with_data, 1);
    }

    #[test]
    fn test_map_falls_back_to_first_year() {
        let view = map_view(1900);
        assert_eq!(view.year(), 1750);
    }

    #[test]
    fn test_slider_redraws_without_accumulating() {
        let mut view = map_view(2000);
        let stats = view.set_year(1850);

        assert_eq!(stats.with_data, 0);
        assert_eq!(view.surface().count(COUNTRY_CLASS), 2);
        assert_eq!(view.set_year(3000).with_data, 1);
        assert_eq!(view.year(), 2000);
    }

    #[test]
    fn test_year_table_follows_feature_order() {
        let table = map_view(2000).year_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table[2], (1999, vec![None, Some(2.0)]));
    }

    #[test]
    fn test_bar_view_defaults_to_first_country() {
        let view = BarView::new(BarRenderer::new(960.0, 500.0), dataset());

        assert_eq!(view.countries(), &["France".to_string(), "Norway".to_string()]);
        assert_eq!(view.selected(), Some("France"));
        let starts: Vec<i32> = view.buckets().iter().map(|b| b.bucket_start).collect();
        assert_eq!(starts, vec![1750, 1800, 2000]);
        assert_eq!(view.surface().count(BAR_CLASS), 3);
    }

    #[test]
    fn test_bar_view_unknown_country_has_no_bars() {
        let mut view = BarView::new(BarRenderer::new(960.0, 500.0), dataset());

        assert_eq!(view.select("Atlantis"), 0);
        assert_eq!(view.surface().count(BAR_CLASS), 0);
        assert_eq!(view.select("Norway"), 1);
    }

    #[test]
    fn test_render_all_covers_every_country() {
        let view = BarView::new(BarRenderer::new(960.0, 500.0), dataset());
        let charts = view.render_all();

        assert_eq!(charts.len(), 2);
        assert_eq!(charts[1].0, "Norway");
        assert!(charts[1].1.contains("class=\"bar\""));
    }
}
