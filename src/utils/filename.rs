use chrono::{Datelike, Local, NaiveDate};
use std::path::PathBuf;

/// Page name for a given day: climate-dashboard-{YYMMDD}.html
pub fn dashboard_filename(date: NaiveDate) -> String {
    format!(
        "climate-dashboard-{:02}{:02}{:02}.html",
        date.year() % 100,
        date.month(),
        date.day()
    )
}

/// Default output path: output/climate-dashboard-{YYMMDD}.html
pub fn generate_default_page_filename() -> PathBuf {
    let today = Local::now().date_naive();
    PathBuf::from("output").join(dashboard_filename(today))
}
