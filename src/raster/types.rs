pub use gdal_sys::GDALDataType;

use crate::utils::_string;

/// Type-level constraint for the primitive numeric values GDAL can read into
/// or write from a buffer.
pub trait GdalType: Copy + Default {
    fn gdal_type() -> GDALDataType::Type;

    /// GDAL's name for the type, e.g. `"Float32"`.
    fn gdal_type_name() -> String {
        _string(unsafe { gdal_sys::GDALGetDataTypeName(Self::gdal_type()) })
    }
}

impl GdalType for u8 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Byte
    }
}

impl GdalType for u16 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_UInt16
    }
}

impl GdalType for u32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_UInt32
    }
}

impl GdalType for i16 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Int16
    }
}

impl GdalType for i32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Int32
    }
}

impl GdalType for f32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Float32
    }
}

impl GdalType for f64 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Float64
    }
}
