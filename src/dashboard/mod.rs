pub mod orchestrator;
pub mod page;
pub mod views;

pub use orchestrator::{Dashboard, RenderOptions};
pub use page::render_page;
pub use views::{initial_year, BarView, LineView, MapView, ScatterView};
