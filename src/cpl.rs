//! GDAL Common Portability Library string lists
//!
//! Owned `KEY=VALUE` lists handed to GDAL as creation, open and transformer options.

use std::ffi::CString;
use std::fmt::{Debug, Formatter};
use std::ptr;

use gdal_sys::{CSLCount, CSLDestroy, CSLDuplicate, CSLSetNameValue};
use libc::c_char;

use crate::errors::{DatasetError, Result};
use crate::utils::_string_array;

/// Wraps a `char **papszStrList` pointer, a NULL terminated array of
/// NULL terminated strings, and destroys it on `drop`.
pub struct CslStringList {
    list_ptr: *mut *mut c_char,
}

impl CslStringList {
    /// Creates an empty GDAL string list.
    pub fn new() -> Self {
        Self {
            list_ptr: ptr::null_mut(),
        }
    }

    /// Assigns `value` to `name`. Overwrites duplicate `name`s.
    ///
    /// Fails if `name` has non alphanumeric characters, or `value` has newline characters.
    pub fn set_name_value(&mut self, name: &str, value: &str) -> Result<()> {
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DatasetError::BadArgument(format!(
                "Invalid characters in name: '{name}'"
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(DatasetError::BadArgument(format!(
                "Invalid characters in value: '{value}'"
            )));
        }
        let psz_name = CString::new(name)?;
        let psz_value = CString::new(value)?;

        unsafe {
            self.list_ptr = CSLSetNameValue(self.list_ptr, psz_name.as_ptr(), psz_value.as_ptr());
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        (unsafe { CSLCount(self.as_ptr()) }) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the raw pointer to the underlying data.
    pub fn as_ptr(&self) -> gdal_sys::CSLConstList {
        self.list_ptr as gdal_sys::CSLConstList
    }
}

impl Drop for CslStringList {
    fn drop(&mut self) {
        unsafe { CSLDestroy(self.list_ptr) }
    }
}

impl Default for CslStringList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CslStringList {
    fn clone(&self) -> Self {
        let list_ptr = unsafe { CSLDuplicate(self.as_ptr()) };
        Self { list_ptr }
    }
}

impl Debug for CslStringList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(_string_array(self.list_ptr))
            .finish()
    }
}

impl TryFrom<&[(&str, &str)]> for CslStringList {
    type Error = DatasetError;

    fn try_from(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut list = Self::new();
        for (name, value) in pairs {
            list.set_name_value(name, value)?;
        }
        Ok(list)
    }
}
