use gdal_sys::{self, CPLErr};
use libc::c_char;
use std::ffi::{CStr, CString};
use std::path::Path;

use crate::errors::*;

pub fn _string(raw_ptr: *const c_char) -> String {
    if raw_ptr.is_null() {
        return String::new();
    }
    let c_str = unsafe { CStr::from_ptr(raw_ptr) };
    c_str.to_string_lossy().into_owned()
}

/// Copies a NULL terminated `char **` list into owned strings.
pub fn _string_array(raw_ptr: *mut *mut c_char) -> Vec<String> {
    let mut ret_val: Vec<String> = vec![];
    if raw_ptr.is_null() {
        return ret_val;
    }
    let mut i = 0;
    unsafe {
        loop {
            let next = raw_ptr.add(i).read();
            if next.is_null() {
                break;
            }
            ret_val.push(_string(next));
            i += 1;
        }
    }
    ret_val
}

pub fn _last_cpl_err(cpl_err_class: CPLErr::Type) -> DatasetError {
    let last_err_no = unsafe { gdal_sys::CPLGetLastErrorNo() };
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() });
    unsafe { gdal_sys::CPLErrorReset() };
    DatasetError::GdalError {
        class: cpl_err_class.into(),
        number: last_err_no,
        msg: last_err_msg,
    }
}

pub fn _last_null_pointer_err(method_name: &'static str) -> DatasetError {
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() });
    unsafe { gdal_sys::CPLErrorReset() };
    DatasetError::NullPointer {
        method_name,
        msg: last_err_msg,
    }
}

pub fn _path_to_c_string<P: AsRef<Path>>(path: P) -> Result<CString> {
    let path_ref: &Path = path.as_ref();
    let path_str = path_ref.to_string_lossy();
    CString::new(path_str.as_ref()).map_err(Into::into)
}

/// Splits a GDAL `KEY=VALUE` entry.
///
/// Empty pieces are skipped, entries that do not split into exactly two
/// non-empty parts are rejected.
pub fn _key_value(entry: &str) -> Option<(String, String)> {
    let mut parts = entry.split('=').filter(|part| !part.is_empty());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key.to_string(), value.to_string())),
        _ => None,
    }
}
