use std::ffi::NulError;
use std::str::Utf8Error;

use gdal_sys::{CPLErr, OGRErr};
use libc::c_int;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("Unable to open dataset '{path}': {msg}")]
    DatasetOpenFailed { path: String, msg: String },
    #[error("Band {index} does not exist, dataset has {count} band(s)")]
    InvalidBand { index: usize, count: usize },
    #[error("CPL error class: '{class:?}', error number: '{number}', error msg: '{msg}'")]
    GdalError {
        class: CplErrType,
        number: c_int,
        msg: String,
    },
    #[error("Unable to set metadata item '{key}': {msg}")]
    MetadataOperationFailed { key: String, msg: String },
    #[error("Writing band {band} failed: {source}")]
    WriteFailed {
        band: usize,
        #[source]
        source: Box<DatasetError>,
    },
    #[error("Computing statistics of band {band} failed: {source}")]
    StatisticsComputationFailed {
        band: usize,
        #[source]
        source: Box<DatasetError>,
    },
    #[error("Buffer dimensions do not match: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },
    #[error("Reprojection failed: {0}")]
    ReprojectionFailed(String),
    #[error("GDAL method '{method_name}' returned a NULL pointer. Error msg: '{msg}'")]
    NullPointer {
        method_name: &'static str,
        msg: String,
    },
    #[error("OGR method '{method_name}' returned error: '{err:?}'")]
    OgrError {
        err: OGRErr::Type,
        method_name: &'static str,
    },
    #[error("Bad argument: {0}")]
    BadArgument(String),
    #[error("FfiNulError")]
    FfiNulError(#[from] NulError),
    #[error("StrUtf8Error")]
    StrUtf8Error(#[from] Utf8Error),
    #[cfg(feature = "ndarray")]
    #[error("NdarrayShapeError")]
    NdarrayShapeError(#[from] ndarray::ShapeError),
}

impl DatasetError {
    /// Message attached by GDAL to a native failure, if any.
    pub fn native_msg(&self) -> Option<&str> {
        match self {
            DatasetError::GdalError { msg, .. } | DatasetError::NullPointer { msg, .. } => {
                Some(msg.as_str())
            }
            DatasetError::WriteFailed { source, .. }
            | DatasetError::StatisticsComputationFailed { source, .. } => source.native_msg(),
            _ => None,
        }
    }
}

/// Severity of a GDAL CPL error.
///
/// Mirrors `CPLErr` so callers do not need to depend on `gdal-sys` constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CplErrType {
    None = 0,
    Debug,
    Warning,
    Failure,
    Fatal,
}

impl From<CPLErr::Type> for CplErrType {
    fn from(error_type: CPLErr::Type) -> Self {
        match error_type {
            CPLErr::CE_None => Self::None,
            CPLErr::CE_Debug => Self::Debug,
            CPLErr::CE_Warning => Self::Warning,
            CPLErr::CE_Failure => Self::Failure,
            CPLErr::CE_Fatal => Self::Fatal,
            // any unknown code is a failure
            _ => Self::Failure,
        }
    }
}
