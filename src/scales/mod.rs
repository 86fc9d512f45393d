pub mod band;
pub mod color;
pub mod linear;

pub use band::BandScale;
pub use color::{ColorScale, Rgb, RD_YL_BU};
pub use linear::{extent, LinearScale};
