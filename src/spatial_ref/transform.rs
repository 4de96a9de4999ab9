use crate::errors::{DatasetError, Result};
use crate::spatial_ref::SpatialRef;
use crate::utils::{_last_cpl_err, _last_null_pointer_err};
use gdal_sys::{CPLErr, OGRCoordinateTransformationH};
use libc::c_int;
use std::ptr::null_mut;

/// Defines a coordinate transformation from one [`SpatialRef`] to another.
#[derive(Debug)]
pub struct CoordTransform {
    inner: OGRCoordinateTransformationH,
}

impl Drop for CoordTransform {
    fn drop(&mut self) {
        unsafe { gdal_sys::OCTDestroyCoordinateTransformation(self.inner) };
    }
}

impl CoordTransform {
    /// Constructs a new transformation from `source` to `target`.
    ///
    /// Fails when PROJ knows no operation between the two systems.
    pub fn new(source: &SpatialRef, target: &SpatialRef) -> Result<CoordTransform> {
        let c_obj = unsafe {
            gdal_sys::OCTNewCoordinateTransformation(source.to_c_hsrs(), target.to_c_hsrs())
        };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OCTNewCoordinateTransformation"));
        }
        Ok(Self { inner: c_obj })
    }

    /// Transform coordinates in place.
    ///
    /// # Arguments
    /// * `x` - slice of x coordinates
    /// * `y` - slice of y coordinates (must match x in length)
    /// * `z` - slice of z coordinates, or an empty slice to ignore
    pub fn transform_coords(&self, x: &mut [f64], y: &mut [f64], z: &mut [f64]) -> Result<()> {
        let nb_coords = x.len();
        if nb_coords != y.len() || !(z.is_empty() || z.len() == nb_coords) {
            return Err(DatasetError::BadArgument(format!(
                "transform coordinate slices have different lengths: {} {} {}",
                nb_coords,
                y.len(),
                z.len()
            )));
        }
        let ret_val = unsafe {
            gdal_sys::OCTTransform(
                self.inner,
                nb_coords as c_int,
                x.as_mut_ptr(),
                y.as_mut_ptr(),
                if z.is_empty() {
                    null_mut()
                } else {
                    z.as_mut_ptr()
                },
            ) == 1
        };

        if !ret_val {
            return Err(_last_cpl_err(CPLErr::CE_Failure));
        }
        Ok(())
    }
}
