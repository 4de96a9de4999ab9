//! GDAL runtime version inspection

use crate::utils::_string;
use std::ffi::CString;

/// Calls `GDALVersionInfo`, expecting `key` as one of
/// "VERSION_NUM", "RELEASE_DATE", "RELEASE_NAME", "--version", "LICENSE", "BUILD_INFO".
pub fn version_info(key: &str) -> String {
    match CString::new(key) {
        Ok(c_key) => _string(unsafe { gdal_sys::GDALVersionInfo(c_key.as_ptr()) }),
        Err(_) => String::new(),
    }
}

/// One line version summary, e.g. "GDAL 3.8.4, released 2024/02/08".
pub fn version_summary() -> String {
    version_info("--version")
}

/// `GDAL_VERSION_NUM` of the linked library, e.g. `3080400`.
pub fn version_num() -> Option<u32> {
    version_info("VERSION_NUM").trim().parse().ok()
}
