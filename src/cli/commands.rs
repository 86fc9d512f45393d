use crate::cli::args::{Cli, Commands, SourceArgs};
use crate::config::DashboardConfig;
use crate::dashboard::{render_page, Dashboard, RenderOptions};
use crate::error::{DashboardError, Result};
use crate::processors::Aggregator;
use crate::readers::{ConcurrentReader, DataSource};
use crate::utils::filename::generate_default_page_filename;
use crate::utils::progress::ProgressReporter;
use std::path::PathBuf;
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            output,
            year,
            country,
            title,
            sources,
        } => {
            apply_sources(&mut config, &sources);
            let output = output
                .or_else(|| config.output.path.clone())
                .unwrap_or_else(generate_default_page_filename);
            let options = RenderOptions { year, country };
            render(&config, &options, &title, output, cli.quiet).await
        }
        Commands::Summary { limit, sources } => {
            apply_sources(&mut config, &sources);
            summary(&config, limit, cli.quiet).await
        }
        Commands::Countries { sources } => {
            apply_sources(&mut config, &sources);
            countries(&config, cli.quiet).await
        }
    }
}

fn apply_sources(config: &mut DashboardConfig, sources: &SourceArgs) {
    if let Some(source) = &sources.temperatures {
        config.data.temperature_source = source.clone();
    }
    if let Some(source) = &sources.chart_data {
        config.data.chart_source = source.clone();
    }
    if let Some(source) = &sources.boundaries {
        config.data.boundary_source = source.clone();
    }
}

async fn render(
    config: &DashboardConfig,
    options: &RenderOptions,
    title: &str,
    output: PathBuf,
    quiet: bool,
) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Loading data sources...", quiet);
    let reader = ConcurrentReader::new();

    let dashboard = Dashboard::build(config, &reader, options).await;
    progress.set_message("Writing dashboard page...");
    let page = render_page(&dashboard, title)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&output, page.as_bytes()).await?;
    info!(output = %output.display(), bytes = page.len(), "wrote dashboard page");

    let failed = dashboard.failed_charts();
    progress.finish_with_message(&format!("Dashboard written to {}", output.display()));
    if let Some(map) = &dashboard.map {
        progress.println(&format!(
            "Map: year {} ({} of {} countries with data)",
            map.year(),
            map.stats().with_data,
            map.stats().features
        ));
    }
    if let Some(bars) = &dashboard.bars {
        progress.println(&format!(
            "Bar chart: {} countries, showing {}",
            bars.countries().len(),
            bars.selected().unwrap_or("none")
        ));
    }

    if failed.len() == 4 {
        return Err(DashboardError::MissingData(
            "no chart could be rendered".to_string(),
        ));
    }
    for chart in failed {
        warn!(chart, "chart left empty");
        progress.println(&format!("Warning: {} chart could not be rendered", chart));
    }
    Ok(())
}

async fn summary(config: &DashboardConfig, limit: Option<usize>, quiet: bool) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Loading temperatures...", quiet);
    let source = DataSource::parse(&config.data.temperature_source);
    let dataset = ConcurrentReader::new().temperatures(&source).await?;
    progress.finish_with_message(&format!("Loaded {} rows", dataset.len()));

    let series = Aggregator::new().yearly_global_average(&dataset.records);
    let shown = limit.map_or(0, |n| series.len().saturating_sub(n));

    println!("Source: {}", dataset.source);
    println!(
        "Rows: {}, skipped (bad date): {}, missing temperature: {}",
        dataset.len(),
        dataset.skipped_rows,
        dataset.missing_temperatures()
    );
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        println!("Years: {}-{} ({} with data)", first.year, last.year, series.len());
    }
    println!("\n{:>6}  {:>8}", "Year", "Mean °C");
    for point in &series[shown..] {
        println!("{:>6}  {:>8.2}", point.year, point.temperature);
    }
    Ok(())
}

async fn countries(config: &DashboardConfig, quiet: bool) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Loading chart data...", quiet);
    let source = DataSource::parse(&config.data.chart_source);
    let dataset = ConcurrentReader::new().temperatures(&source).await?;
    let countries = dataset.countries();
    progress.finish_with_message(&format!("{} countries", countries.len()));

    for country in countries {
        println!("{}", country);
    }
    Ok(())
}
