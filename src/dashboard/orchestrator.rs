use crate::config::DashboardConfig;
use crate::dashboard::views::{BarView, LineView, MapView, ScatterView};
use crate::error::Result;
use crate::processors::Aggregator;
use crate::readers::{ConcurrentReader, DataSource};
use crate::render::{AnimatedTrendRenderer, BarRenderer, MapRenderer, TrendRenderer};
use crate::scales::ColorScale;
use tracing::{error, info};

/// Per-run choices layered over the configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Map year; the configured initial year when unset.
    pub year: Option<i32>,
    /// Bar chart country; the first listed country when unset.
    pub country: Option<String>,
}

/// Every chart that rendered. A chart whose pipeline failed is `None`.
pub struct Dashboard {
    pub map: Option<MapView>,
    pub line: Option<LineView>,
    pub scatter: Option<ScatterView>,
    pub bars: Option<BarView>,
    pub color: ColorScale,
}

impl Dashboard {
    /// Run the four chart pipelines concurrently.
    ///
    /// The map waits for both of its inputs; the other charts load on their
    /// own. A failure is logged and leaves only that chart empty.
    pub async fn build(
        config: &DashboardConfig,
        reader: &ConcurrentReader,
        options: &RenderOptions,
    ) -> Self {
        let color = ColorScale::temperature();
        let temperature_source = DataSource::parse(&config.data.temperature_source);
        let chart_source = DataSource::parse(&config.data.chart_source);
        let boundary_source = DataSource::parse(&config.data.boundary_source);

        let (map, line, scatter, bars) = tokio::join!(
            map_pipeline(config, reader, &temperature_source, &boundary_source, options, color),
            line_pipeline(config, reader, &temperature_source),
            scatter_pipeline(config, reader, &chart_source),
            bar_pipeline(config, reader, &chart_source, options),
        );

        let dashboard = Self {
            map: settle("map", map),
            line: settle("line", line),
            scatter: settle("scatter", scatter),
            bars: settle("bar", bars),
            color,
        };
        let sources = reader.loaded_sources().await;
        info!(
            rendered = 4 - dashboard.failed_charts().len(),
            sources,
            "dashboard built"
        );
        dashboard
    }

    /// Names of the charts whose pipeline failed.
    pub fn failed_charts(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if self.map.is_none() {
            failed.push("map");
        }
        if self.line.is_none() {
            failed.push("line");
        }
        if self.scatter.is_none() {
            failed.push("scatter");
        }
        if self.bars.is_none() {
            failed.push("bar");
        }
        failed
    }
}

fn settle<T>(chart: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(view) => Some(view),
        Err(e) => {
            error!(chart, error = %e, "chart pipeline failed, leaving it empty");
            None
        }
    }
}

async fn map_pipeline(
    config: &DashboardConfig,
    reader: &ConcurrentReader,
    temperature_source: &DataSource,
    boundary_source: &DataSource,
    options: &RenderOptions,
    color: ColorScale,
) -> Result<MapView> {
    let inputs = reader
        .read_map_inputs(temperature_source, boundary_source)
        .await?;

    let temperatures = inputs.temperatures.clone();
    let averages = tokio::task::spawn_blocking(move || {
        Aggregator::new().yearly_country_average(&temperatures.records)
    })
    .await?;

    let renderer = MapRenderer::new(config.map.width as f64, config.map.height as f64, color);
    let year = options.year.unwrap_or(config.map.initial_year);
    let view = MapView::new(renderer, averages, inputs.boundaries, year)?;
    info!(
        year = view.year(),
        features = view.stats().features,
        with_data = view.stats().with_data,
        "map rendered"
    );
    Ok(view)
}

async fn line_pipeline(
    config: &DashboardConfig,
    reader: &ConcurrentReader,
    source: &DataSource,
) -> Result<LineView> {
    let dataset = reader.temperatures(source).await?;
    let renderer = TrendRenderer::new(config.charts.width as f64, config.charts.height as f64);
    let view = LineView::new(&renderer, &dataset);
    info!(points = view.series().len(), "line chart rendered");
    Ok(view)
}

async fn scatter_pipeline(
    config: &DashboardConfig,
    reader: &ConcurrentReader,
    source: &DataSource,
) -> Result<ScatterView> {
    let dataset = reader.temperatures(source).await?;
    let renderer =
        AnimatedTrendRenderer::new(config.charts.width as f64, config.charts.height as f64)
            .with_settings(config.animation.settings());
    let view = ScatterView::new(renderer, &dataset);
    info!(points = view.series().len(), "scatter-line chart rendered");
    Ok(view)
}

async fn bar_pipeline(
    config: &DashboardConfig,
    reader: &ConcurrentReader,
    source: &DataSource,
    options: &RenderOptions,
) -> Result<BarView> {
    let dataset = reader.temperatures(source).await?;
    let renderer = BarRenderer::new(config.charts.width as f64, config.charts.height as f64);
    let mut view = BarView::new(renderer, dataset);
    if let Some(country) = &options.country {
        view.select(country);
    }
    info!(
        countries = view.countries().len(),
        selected = view.selected().unwrap_or_default(),
        bars = view.buckets().len(),
        "bar chart rendered"
    );
    Ok(view)
}
