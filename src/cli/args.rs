use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-dashboard")]
#[command(about = "Render global land temperature data as an interactive dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: dashboard.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,
}

/// Source locations that override the configuration.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long, help = "Temperature table for the map and line chart (path or URL)")]
    pub temperatures: Option<String>,

    #[arg(long, help = "Temperature table for the scatter-line and bar charts")]
    pub chart_data: Option<String>,

    #[arg(long, help = "GeoJSON country boundaries (path or URL)")]
    pub boundaries: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dashboard page
    Render {
        #[arg(
            short,
            long,
            help = "Output HTML file path [default: output/climate-dashboard-{YYMMDD}.html]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Initial map year")]
        year: Option<i32>,

        #[arg(long, help = "Initially selected bar chart country")]
        country: Option<String>,

        #[arg(long, default_value = "Global Land Temperatures")]
        title: String,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Print the global yearly mean temperature
    Summary {
        #[arg(short, long, help = "Show only the last N years")]
        limit: Option<usize>,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// List countries in order of first appearance
    Countries {
        #[command(flatten)]
        sources: SourceArgs,
    },
}
