use std::collections::HashMap;
use std::ffi::CString;
use std::ptr;

use gdal_sys::{self, CPLErr, GDALMajorObjectH};

use crate::errors::*;
use crate::utils::{_key_value, _last_cpl_err, _last_null_pointer_err, _string, _string_array};

/// Any GDAL object that carries a description and metadata: datasets, bands, drivers.
pub trait MajorObject {
    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    unsafe fn gdal_object_ptr(&self) -> GDALMajorObjectH;
}

/// Metadata access shared by every [`MajorObject`].
///
/// GDAL stores metadata as `KEY=VALUE` strings grouped in domains; the default
/// domain is the empty one.
pub trait Metadata: MajorObject {
    /// The object description. For datasets this is usually the file name.
    fn description(&self) -> Result<String> {
        let c_res = unsafe { gdal_sys::GDALGetDescription(self.gdal_object_ptr()) };
        if c_res.is_null() {
            return Err(_last_null_pointer_err("GDALGetDescription"));
        }
        Ok(_string(c_res))
    }

    /// All entries of the default domain.
    ///
    /// Entries that do not split into exactly one key and one value are skipped.
    fn metadata(&self) -> HashMap<String, String> {
        let c_list = unsafe { gdal_sys::GDALGetMetadata(self.gdal_object_ptr(), ptr::null()) };
        parse_entries(_string_array(c_list))
    }

    /// All entries of `domain`, e.g. `"IMAGE_STRUCTURE"`.
    fn metadata_domain(&self, domain: &str) -> Result<HashMap<String, String>> {
        let c_domain = CString::new(domain)?;
        let c_list =
            unsafe { gdal_sys::GDALGetMetadata(self.gdal_object_ptr(), c_domain.as_ptr()) };
        Ok(parse_entries(_string_array(c_list)))
    }

    fn metadata_item(&self, key: &str, domain: &str) -> Option<String> {
        let c_key = CString::new(key).ok()?;
        let c_domain = CString::new(domain).ok()?;
        let c_res = unsafe {
            gdal_sys::GDALGetMetadataItem(self.gdal_object_ptr(), c_key.as_ptr(), c_domain.as_ptr())
        };
        if c_res.is_null() {
            None
        } else {
            Some(_string(c_res))
        }
    }

    fn set_metadata_item(&mut self, key: &str, value: &str, domain: &str) -> Result<()> {
        let failed = |msg: String| DatasetError::MetadataOperationFailed {
            key: key.to_string(),
            msg,
        };
        let c_key = CString::new(key).map_err(|e| failed(e.to_string()))?;
        let c_value = CString::new(value).map_err(|e| failed(e.to_string()))?;
        let c_domain = CString::new(domain).map_err(|e| failed(e.to_string()))?;

        let rv = unsafe {
            gdal_sys::GDALSetMetadataItem(
                self.gdal_object_ptr(),
                c_key.as_ptr(),
                c_value.as_ptr(),
                c_domain.as_ptr(),
            )
        };
        if rv != CPLErr::CE_None {
            let msg = match _last_cpl_err(rv) {
                DatasetError::GdalError { msg, .. } => msg,
                err => err.to_string(),
            };
            return Err(failed(msg));
        }
        Ok(())
    }

    /// Sets every entry in the default domain, stopping at the first key GDAL rejects.
    fn set_metadata<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in entries {
            self.set_metadata_item(key.as_ref(), value.as_ref(), "")?;
        }
        Ok(())
    }
}

fn parse_entries(entries: Vec<String>) -> HashMap<String, String> {
    entries.iter().filter_map(|entry| _key_value(entry)).collect()
}
