//! Raster bands: typed buffers, band I/O and statistics

mod rasterband;
mod types;

pub(crate) use rasterband::sample_count;
pub use rasterband::{BandStatistics, RasterBand};
pub use types::{GDALDataType, GdalType};
