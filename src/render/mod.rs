pub mod animated;
pub mod axis;
pub mod bars;
pub mod curve;
pub mod frame;
pub mod map;
pub mod projection;
pub mod surface;
pub mod svg;
pub mod trend;

pub use animated::{AnimatedTrendRenderer, AnimationSettings, AnimationToken, Timeline};
pub use bars::BarRenderer;
pub use frame::{ChartFrame, Margins};
pub use map::{MapRenderer, MapStats};
pub use projection::Equirectangular;
pub use surface::{HoverBinding, Shape, Surface};
pub use trend::TrendRenderer;
