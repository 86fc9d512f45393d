pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod interaction;
pub mod models;
pub mod processors;
pub mod readers;
pub mod render;
pub mod scales;
pub mod utils;

pub use crate::config::DashboardConfig;
pub use dashboard::{Dashboard, RenderOptions};
pub use error::{DashboardError, Result};
