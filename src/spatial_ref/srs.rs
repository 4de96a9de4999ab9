use std::ffi::{c_void, CString};
use std::ptr;

use gdal_sys::{self, OGRErr, OGRSpatialReferenceH};
use libc::{c_char, c_int};

use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _string};

/// A coordinate reference system, owning an `OGRSpatialReferenceH`.
#[derive(Debug)]
pub struct SpatialRef(OGRSpatialReferenceH);

impl Drop for SpatialRef {
    fn drop(&mut self) {
        unsafe { gdal_sys::OSRRelease(self.0) };
        self.0 = ptr::null_mut();
    }
}

impl Clone for SpatialRef {
    fn clone(&self) -> SpatialRef {
        let n_obj = unsafe { gdal_sys::OSRClone(self.0) };
        SpatialRef(n_obj)
    }
}

impl PartialEq for SpatialRef {
    fn eq(&self, other: &SpatialRef) -> bool {
        unsafe { gdal_sys::OSRIsSame(self.0, other.0) == 1 }
    }
}

impl SpatialRef {
    fn empty() -> Result<SpatialRef> {
        let c_obj = unsafe { gdal_sys::OSRNewSpatialReference(ptr::null()) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRNewSpatialReference"));
        }
        Ok(Self::with_traditional_axis_order(c_obj))
    }

    // x/y stay easting/northing (lon/lat) regardless of what the authority defines
    fn with_traditional_axis_order(c_obj: OGRSpatialReferenceH) -> SpatialRef {
        #[cfg(major_ge_3)]
        unsafe {
            gdal_sys::OSRSetAxisMappingStrategy(
                c_obj,
                gdal_sys::OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER,
            )
        };
        SpatialRef(c_obj)
    }

    /// Parses any definition GDAL accepts as user input:
    /// `EPSG:n` codes, WKT, PROJ strings, `OGC:CRS84`, ...
    pub fn from_definition(definition: &str) -> Result<SpatialRef> {
        let c_definition = CString::new(definition)?;
        let srs = Self::empty()?;
        let rv = unsafe { gdal_sys::OSRSetFromUserInput(srs.0, c_definition.as_ptr()) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(DatasetError::OgrError {
                err: rv,
                method_name: "OSRSetFromUserInput",
            });
        }
        Ok(srs)
    }

    pub fn from_wkt(wkt: &str) -> Result<SpatialRef> {
        let c_str = CString::new(wkt)?;
        let c_obj = unsafe { gdal_sys::OSRNewSpatialReference(c_str.as_ptr()) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRNewSpatialReference"));
        }
        Ok(Self::with_traditional_axis_order(c_obj))
    }

    pub fn from_epsg(epsg_code: u32) -> Result<SpatialRef> {
        let srs = Self::empty()?;
        let rv = unsafe { gdal_sys::OSRImportFromEPSG(srs.0, epsg_code as c_int) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(DatasetError::OgrError {
                err: rv,
                method_name: "OSRImportFromEPSG",
            });
        }
        Ok(srs)
    }

    pub fn to_wkt(&self) -> Result<String> {
        let mut c_wkt: *mut c_char = ptr::null_mut();
        let rv = unsafe { gdal_sys::OSRExportToWkt(self.0, &mut c_wkt) };
        let res = if rv != OGRErr::OGRERR_NONE {
            Err(DatasetError::OgrError {
                err: rv,
                method_name: "OSRExportToWkt",
            })
        } else {
            Ok(_string(c_wkt))
        };
        unsafe { gdal_sys::VSIFree(c_wkt as *mut c_void) };
        res
    }

    pub fn auth_name(&self) -> Option<String> {
        let c_ptr = unsafe { gdal_sys::OSRGetAuthorityName(self.0, ptr::null()) };
        if c_ptr.is_null() {
            None
        } else {
            Some(_string(c_ptr))
        }
    }

    pub fn auth_code(&self) -> Option<i32> {
        let c_ptr = unsafe { gdal_sys::OSRGetAuthorityCode(self.0, ptr::null()) };
        if c_ptr.is_null() {
            return None;
        }
        _string(c_ptr).parse().ok()
    }

    /// `"EPSG:4326"` style identifier, when the authority is known.
    pub fn authority(&self) -> Option<String> {
        Some(format!("{}:{}", self.auth_name()?, self.auth_code()?))
    }

    pub fn is_geographic(&self) -> bool {
        unsafe { gdal_sys::OSRIsGeographic(self.0) == 1 }
    }

    pub fn is_projected(&self) -> bool {
        unsafe { gdal_sys::OSRIsProjected(self.0) == 1 }
    }

    /// Returns a C pointer to the allocated [`gdal_sys::OGRSpatialReferenceH`] memory.
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn to_c_hsrs(&self) -> OGRSpatialReferenceH {
        self.0
    }
}
