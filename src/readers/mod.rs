pub mod boundary_reader;
pub mod concurrent_reader;
pub mod source;
pub mod temperature_reader;

pub use boundary_reader::{BoundaryDataset, BoundaryReader};
pub use concurrent_reader::{ConcurrentReader, MapInputs, SourceCache};
pub use source::DataSource;
pub use temperature_reader::{TemperatureDataset, TemperatureReader};
