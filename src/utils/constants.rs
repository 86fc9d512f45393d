/// Default data sources
pub const DEFAULT_TEMPERATURE_SOURCE: &str = "data/GlobalLandTemperaturesByCountry.csv";
pub const DEFAULT_CHART_SOURCE: &str = "data/Barchart_data.csv";
pub const DEFAULT_BOUNDARY_SOURCE: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

/// Configuration
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
pub const ENV_PREFIX: &str = "CLIMATE_DASHBOARD";

/// Color domain (inverted: hot end first)
pub const COLOR_DOMAIN_HOT: f64 = 40.0;
pub const COLOR_DOMAIN_COLD: f64 = -10.0;
pub const NO_DATA_COLOR: &str = "#ccc";

/// Aggregation
pub const BUCKET_WIDTH_YEARS: i32 = 50;
pub const LINE_CHART_PADDING: f64 = 1.0;

/// Map defaults
pub const DEFAULT_MAP_WIDTH: u32 = 1200;
pub const DEFAULT_MAP_HEIGHT: u32 = 800;
pub const DEFAULT_INITIAL_YEAR: i32 = 2000;

/// Chart defaults
pub const DEFAULT_CHART_WIDTH: u32 = 960;
pub const DEFAULT_CHART_HEIGHT: u32 = 500;
pub const BAND_PADDING: f64 = 0.1;

/// Animation defaults
pub const DEFAULT_ANIMATION_MS: u64 = 4000;
pub const DEFAULT_POINT_GROW_MS: u64 = 500;
pub const DEFAULT_POINT_RADIUS: f64 = 5.0;

/// Mark colors
pub const LINE_COLOR: &str = "steelblue";
pub const DOT_COLOR: &str = "#69b3a2";
pub const BAR_COLOR: &str = "steelblue";
pub const BORDER_COLOR: &str = "white";

/// Tooltip offsets relative to the pointer
pub const MAP_TOOLTIP_OFFSET: (f64, f64) = (10.0, 10.0);
pub const TREND_TOOLTIP_OFFSET: (f64, f64) = (10.0, -28.0);
pub const BAR_TOOLTIP_OFFSET: (f64, f64) = (10.0, -10.0);

// Reader defaults
