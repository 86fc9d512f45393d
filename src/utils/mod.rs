pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{dashboard_filename, generate_default_page_filename};
pub use progress::ProgressReporter;
