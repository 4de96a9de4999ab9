//! An owned facade over [GDAL](https://gdal.org/) raster datasets.
//!
//! A [`RasterDataset`] owns one GDAL dataset handle and exposes band I/O,
//! metadata, the geotransform, band statistics and reprojection. The handle is
//! closed exactly once, on drop or through [`RasterDataset::close`].
//!
//! ## Use
//!
//! ```no_run
//! use geode::{Metadata, RasterDataset};
//!
//! # fn main() -> geode::errors::Result<()> {
//! let dataset = RasterDataset::open("fixtures/tinymarble.tif")?;
//! let bands = dataset.read_raster_data(&[1])?;
//! let statistics = dataset.compute_statistics(1)?;
//! println!("{} samples, mean {}", bands[&1].len(), statistics.mean);
//! println!("{:?}", dataset.metadata());
//!
//! let web_mercator = dataset.reproject("EPSG:3857")?;
//! println!("{:?}", web_mercator.bounds()?);
//! # Ok(())
//! # }
//! ```
//!
//! GDAL reports errors through a process wide callback. Call
//! [`config::route_errors_to_log`] to forward them to the [`log`] facade.

pub mod config;
pub mod cpl;
mod dataset;
mod driver;
pub mod errors;
mod geo_transform;
mod metadata;
pub mod raster;
pub mod spatial_ref;
pub mod utils;
pub mod version;
mod warp;

#[cfg(test)]
mod test_utils;

pub use dataset::{DatasetOptions, OpenFlags, RasterDataset};
pub use driver::Driver;
pub use geo_transform::{GeoTransform, GeoTransformEx};
pub use metadata::{MajorObject, Metadata};
pub use raster::BandStatistics;
pub use warp::{ReprojectOptions, ResampleAlg};
