use crate::cpl::CslStringList;
use crate::dataset::{RasterDataset, _register_drivers};
use crate::errors::*;
use crate::raster::{GDALDataType, GdalType};
use crate::utils::{_last_null_pointer_err, _path_to_c_string, _string};
use gdal_sys::{self, GDALDriverH};
use libc::c_int;
use std::ffi::CString;
use std::path::Path;

/// A GDAL format driver.
///
/// Drivers are owned by GDAL's driver manager and never released, so this
/// is a plain copy of the handle.
#[derive(Debug, Clone, Copy)]
pub struct Driver {
    c_driver: GDALDriverH,
}

impl Driver {
    /// Looks a driver up by short name, e.g. `"GTiff"` or `"MEM"`.
    pub fn get(name: &str) -> Result<Driver> {
        _register_drivers();
        let c_name = CString::new(name)?;
        let c_driver = unsafe { gdal_sys::GDALGetDriverByName(c_name.as_ptr()) };
        if c_driver.is_null() {
            return Err(_last_null_pointer_err("GDALGetDriverByName"));
        };
        Ok(Driver { c_driver })
    }

    /// Creates a new Driver object by wrapping a C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer
    pub unsafe fn from_c_driver(c_driver: GDALDriverH) -> Driver {
        Driver { c_driver }
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_driver(&self) -> GDALDriverH {
        self.c_driver
    }

    pub fn short_name(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetDriverShortName(self.c_driver) };
        _string(rv)
    }

    pub fn long_name(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetDriverLongName(self.c_driver) };
        _string(rv)
    }

    /// Creates a writable dataset of `size` pixels with `bands` bands of type `T`.
    pub fn create_with_band_type<T: GdalType, P: AsRef<Path>>(
        &self,
        filename: P,
        size: (usize, usize),
        bands: usize,
    ) -> Result<RasterDataset> {
        self.create_with_band_type_with_options::<T, P>(filename, size, bands, &CslStringList::new())
    }

    /// Same as [`Driver::create_with_band_type`], passing driver specific creation options
    /// such as `COMPRESS=DEFLATE`.
    pub fn create_with_band_type_with_options<T: GdalType, P: AsRef<Path>>(
        &self,
        filename: P,
        size: (usize, usize),
        bands: usize,
        options: &CslStringList,
    ) -> Result<RasterDataset> {
        self.create_with_data_type(filename, size, bands, T::gdal_type(), options)
    }

    /// Creates a dataset whose band type is only known at runtime,
    /// e.g. copied from another dataset's band.
    pub fn create_with_data_type<P: AsRef<Path>>(
        &self,
        filename: P,
        size: (usize, usize),
        bands: usize,
        data_type: GDALDataType::Type,
        options: &CslStringList,
    ) -> Result<RasterDataset> {
        let c_filename = _path_to_c_string(filename.as_ref())?;
        let c_dataset = unsafe {
            gdal_sys::GDALCreate(
                self.c_driver,
                c_filename.as_ptr(),
                size.0 as c_int,
                size.1 as c_int,
                bands as c_int,
                data_type,
                options.as_ptr() as _,
            )
        };

        if c_dataset.is_null() {
            return Err(_last_null_pointer_err("GDALCreate"));
        };

        log::debug!(
            "created {}x{}x{} {} dataset '{}'",
            size.0,
            size.1,
            bands,
            self.short_name(),
            filename.as_ref().display()
        );
        Ok(unsafe { RasterDataset::from_c_dataset(c_dataset) })
    }
}
