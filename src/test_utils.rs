use std::ffi::c_void;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::raster::GdalType;
use crate::{Driver, RasterDataset};

/// A temporary directory and a path to a file inside it.
///
/// The directory is removed on `drop`.
pub struct TempFixture {
    _temp_dir: tempfile::TempDir,
    temp_path: PathBuf,
}

impl TempFixture {
    /// Creates a temporary directory and path to a non-existent file with given `name`.
    pub fn empty(name: &str) -> Self {
        let _temp_dir = tempfile::tempdir().unwrap();
        let temp_path = _temp_dir.path().join(name);
        Self {
            _temp_dir,
            temp_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }
}

impl AsRef<Path> for TempFixture {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// An in-memory single band dataset of `size` holding `data`.
pub fn mem_dataset<T: GdalType + Copy>(size: (usize, usize), data: &[T]) -> RasterDataset {
    let driver = Driver::get("MEM").unwrap();
    let dataset = driver
        .create_with_band_type::<T, _>("", size, 1)
        .unwrap();
    let mut band = dataset.rasterband(1).unwrap();
    band.write((0, 0), size, size, data).unwrap();
    dataset
}

/// Scoped value for temporarily suppressing thread-local GDAL log messages.
///
/// Keeps expected GDAL errors out of the test output.
pub(crate) struct SuppressGDALErrorLog {
    // !Sync and !Send, and force use of `new`.
    _private: PhantomData<*mut c_void>,
}

impl SuppressGDALErrorLog {
    pub(crate) fn new() -> Self {
        unsafe { gdal_sys::CPLPushErrorHandler(Some(gdal_sys::CPLQuietErrorHandler)) };
        SuppressGDALErrorLog {
            _private: PhantomData,
        }
    }
}

impl Drop for SuppressGDALErrorLog {
    fn drop(&mut self) {
        unsafe { gdal_sys::CPLPopErrorHandler() };
    }
}

/// Asserts that two floating point values are within `epsilon` of each other.
#[macro_export]
macro_rules! assert_near {
    ($left:expr, $right:expr) => {
        $crate::assert_near!($left, $right, epsilon = f64::EPSILON)
    };
    ($left:expr, $right:expr, epsilon = $ep:expr) => {
        assert!(
            ($left - $right).abs() < $ep,
            "|{} - {}| = {} is greater than epsilon {:.4e}",
            $left,
            $right,
            ($left - $right).abs(),
            $ep
        )
    };
    ($left:expr, $right:expr, epsilon = $ep:expr, field = $field:expr) => {
        assert!(
            ($left - $right).abs() < $ep,
            "field {}: |{} - {}| = {} is greater than epsilon {:.4e}",
            $field,
            $left,
            $right,
            ($left - $right).abs(),
            $ep
        )
    };
    (BandStatistics, $left:expr, $right:expr, epsilon = $ep:expr) => {
        $crate::assert_near!($left.min, $right.min, epsilon = $ep, field = "min");
        $crate::assert_near!($left.max, $right.max, epsilon = $ep, field = "max");
        $crate::assert_near!($left.mean, $right.mean, epsilon = $ep, field = "mean");
        $crate::assert_near!(
            $left.std_dev,
            $right.std_dev,
            epsilon = $ep,
            field = "std_dev"
        );
    };
}
