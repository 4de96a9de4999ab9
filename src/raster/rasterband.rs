use std::ffi::c_void;
use std::marker::PhantomData;
use std::ptr;

use crate::dataset::RasterDataset;
use crate::metadata::{MajorObject, Metadata};
use crate::raster::{GDALDataType, GdalType};
use crate::utils::_last_cpl_err;
use gdal_sys::{self, CPLErr, GDALMajorObjectH, GDALRWFlag, GDALRasterBandH};
use libc::c_int;

#[cfg(feature = "ndarray")]
use ndarray::Array2;

use crate::errors::*;

/// Summary statistics of one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Number of samples in a buffer of `size`.
///
/// Fails with `DimensionMismatch` when the product overflows `usize`.
pub(crate) fn sample_count(size: (usize, usize)) -> Result<usize> {
    size.0
        .checked_mul(size.1)
        .ok_or_else(|| DatasetError::DimensionMismatch {
            expected: "a buffer size that fits in memory".to_string(),
            actual: format!("{}x{}", size.0, size.1),
        })
}

/// Represents a single band of a dataset.
///
/// This object carries the lifetime of the dataset that
/// contains it. This is necessary to prevent the dataset
/// from being dropped before the band.
///
/// Bands are handed out from a shared borrow of the dataset and can still
/// write pixels and nodata; see [`RasterDataset::rasterband`].
#[derive(Debug)]
pub struct RasterBand<'a> {
    c_rasterband: GDALRasterBandH,
    index: usize,
    phantom: PhantomData<&'a RasterDataset>,
}

impl<'a> RasterBand<'a> {
    /// Create a RasterBand from a wrapped C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer
    pub unsafe fn from_c_rasterband(
        _: &'a RasterDataset,
        c_rasterband: GDALRasterBandH,
        index: usize,
    ) -> Self {
        RasterBand {
            c_rasterband,
            index,
            phantom: PhantomData,
        }
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_rasterband(&self) -> GDALRasterBandH {
        self.c_rasterband
    }

    /// 1-based position of the band in its dataset.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn x_size(&self) -> usize {
        (unsafe { gdal_sys::GDALGetRasterBandXSize(self.c_rasterband) }) as usize
    }

    pub fn y_size(&self) -> usize {
        (unsafe { gdal_sys::GDALGetRasterBandYSize(self.c_rasterband) }) as usize
    }

    /// Get dimensions of the band.
    /// Note that this may not be the same as `raster_size` on the
    /// owning dataset due to scale.
    pub fn size(&self) -> (usize, usize) {
        (self.x_size(), self.y_size())
    }

    pub fn band_type(&self) -> GDALDataType::Type {
        unsafe { gdal_sys::GDALGetRasterDataType(self.c_rasterband) }
    }

    /// Read data from this band into a slice.
    ///
    /// # Arguments
    /// * window - the window position from top left
    /// * window_size - the window size (GDAL will interpolate data if window_size != size)
    /// * size - the desired size to read
    /// * buffer - a slice to hold the data (length must equal product of size parameter)
    pub fn read_into_slice<T: GdalType>(
        &self,
        window: (isize, isize),
        window_size: (usize, usize),
        size: (usize, usize),
        buffer: &mut [T],
    ) -> Result<()> {
        let pixels = sample_count(size)?;
        if buffer.len() != pixels {
            return Err(DatasetError::DimensionMismatch {
                expected: format!("{pixels} samples"),
                actual: format!("{} samples", buffer.len()),
            });
        }

        let rv = unsafe {
            gdal_sys::GDALRasterIO(
                self.c_rasterband,
                GDALRWFlag::GF_Read,
                window.0 as c_int,
                window.1 as c_int,
                window_size.0 as c_int,
                window_size.1 as c_int,
                buffer.as_mut_ptr() as *mut c_void,
                size.0 as c_int,
                size.1 as c_int,
                T::gdal_type(),
                0,
                0,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }

        Ok(())
    }

    /// Read a window of this band into a new row-major buffer.
    pub fn read_as<T: GdalType>(
        &self,
        window: (isize, isize),
        window_size: (usize, usize),
        size: (usize, usize),
    ) -> Result<Vec<T>> {
        let mut data = vec![T::default(); sample_count(size)?];
        self.read_into_slice(window, window_size, size, &mut data)?;
        Ok(data)
    }

    /// Read the full band, without resampling.
    pub fn read_band_as<T: GdalType>(&self) -> Result<Vec<T>> {
        let size = self.size();
        self.read_as::<T>((0, 0), size, size)
    }

    #[cfg(feature = "ndarray")]
    /// Read the full band as an `Array2<T>`.
    ///
    /// The matrix shape is (rows, cols) and raster shape is (cols in x-axis, rows in y-axis).
    pub fn read_band_as_array<T: GdalType>(&self) -> Result<Array2<T>> {
        let (x_size, y_size) = self.size();
        let data = self.read_band_as::<T>()?;
        Ok(Array2::from_shape_vec((y_size, x_size), data)?)
    }

    /// Write a row-major buffer of `buffer_size` pixels into a window of this band.
    pub fn write<T: GdalType>(
        &mut self,
        window: (isize, isize),
        window_size: (usize, usize),
        buffer_size: (usize, usize),
        data: &[T],
    ) -> Result<()> {
        let pixels = sample_count(buffer_size)?;
        if data.len() != pixels {
            return Err(DatasetError::DimensionMismatch {
                expected: format!("{pixels} samples"),
                actual: format!("{} samples", data.len()),
            });
        }
        let rv = unsafe {
            gdal_sys::GDALRasterIO(
                self.c_rasterband,
                GDALRWFlag::GF_Write,
                window.0 as c_int,
                window.1 as c_int,
                window_size.0 as c_int,
                window_size.1 as c_int,
                data.as_ptr() as *mut c_void,
                buffer_size.0 as c_int,
                buffer_size.1 as c_int,
                T::gdal_type(),
                0,
                0,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn no_data_value(&self) -> Option<f64> {
        let mut pb_success = 1;
        let no_data =
            unsafe { gdal_sys::GDALGetRasterNoDataValue(self.c_rasterband, &mut pb_success) };
        if pb_success == 1 {
            return Some(no_data);
        }
        None
    }

    /// Set or clear (`None`) the no-data value of this band.
    pub fn set_no_data_value(&mut self, no_data: Option<f64>) -> Result<()> {
        let rv = if let Some(no_data) = no_data {
            unsafe { gdal_sys::GDALSetRasterNoDataValue(self.c_rasterband, no_data) }
        } else {
            unsafe { gdal_sys::GDALDeleteRasterNoDataValue(self.c_rasterband) }
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Compute min, max, mean and standard deviation of the band.
    ///
    /// With `approx_ok` GDAL may use overviews or a subsample of blocks.
    pub fn compute_statistics(&self, approx_ok: bool) -> Result<BandStatistics> {
        let mut statistics = BandStatistics {
            min: 0.,
            max: 0.,
            mean: 0.,
            std_dev: 0.,
        };
        let rv = unsafe {
            gdal_sys::GDALComputeRasterStatistics(
                self.c_rasterband,
                c_int::from(approx_ok),
                &mut statistics.min,
                &mut statistics.max,
                &mut statistics.mean,
                &mut statistics.std_dev,
                None,
                ptr::null_mut(),
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(statistics)
    }
}

impl MajorObject for RasterBand<'_> {
    unsafe fn gdal_object_ptr(&self) -> GDALMajorObjectH {
        self.c_rasterband
    }
}

impl Metadata for RasterBand<'_> {}
