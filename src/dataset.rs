use std::collections::BTreeMap;
use std::ffi::{CString, NulError};
use std::path::Path;
use std::ptr::{self, null_mut};
use std::sync::Once;

use bitflags::bitflags;
use gdal_sys::{self, CPLErr, GDALDatasetH, GDALMajorObjectH};
use geo_types::Rect;
use libc::{c_char, c_int, c_uint};

use crate::driver::Driver;
use crate::errors::*;
use crate::geo_transform::{GeoTransform, GeoTransformEx};
use crate::metadata::{MajorObject, Metadata};
use crate::raster::{sample_count, BandStatistics, GDALDataType, GdalType, RasterBand};
use crate::spatial_ref::SpatialRef;
use crate::utils::{_last_cpl_err, _last_null_pointer_err, _path_to_c_string, _string};
use crate::version::version_summary;

static START: Once = Once::new();

/// Registers every GDAL driver, once per process.
pub fn _register_drivers() {
    START.call_once(|| {
        unsafe { gdal_sys::GDALAllRegister() };
        log::debug!(
            "registered {} GDAL drivers ({})",
            unsafe { gdal_sys::GDALGetDriverCount() },
            version_summary()
        );
    });
}

bitflags! {
    /// Open flags, mirroring GDAL's `GDAL_OF_*` constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: c_uint {
        /// Open in read-only mode (default).
        const READONLY = 0x00; // GDAL_OF_READONLY
        /// Open in update mode.
        const UPDATE = 0x01; // GDAL_OF_UPDATE
        /// Only consider raster drivers.
        const RASTER = 0x02; // GDAL_OF_RASTER
        /// Share the dataset with other opens of the same file, in the same thread.
        const SHARED = 0x20; // GDAL_OF_SHARED
        /// Emit an error message when the file can't be opened.
        const VERBOSE_ERROR = 0x40; // GDAL_OF_VERBOSE_ERROR
    }
}

/// Parameters for [`RasterDataset::open_ex`].
#[derive(Debug)]
pub struct DatasetOptions<'a> {
    pub open_flags: OpenFlags,
    /// Restricts the candidate drivers, by short name.
    pub allowed_drivers: Option<&'a [&'a str]>,
    /// Driver specific `KEY=VALUE` open options.
    pub open_options: Option<&'a [&'a str]>,
    pub sibling_files: Option<&'a [&'a str]>,
}

impl Default for DatasetOptions<'_> {
    fn default() -> Self {
        DatasetOptions {
            open_flags: OpenFlags::RASTER,
            allowed_drivers: None,
            open_options: None,
            sibling_files: None,
        }
    }
}

// Null terminated `char **` built from borrowed strings; keeps the CStrings alive.
struct CStringArray {
    _strings: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl CStringArray {
    fn new(values: Option<&[&str]>) -> std::result::Result<Option<Self>, NulError> {
        let Some(values) = values else {
            return Ok(None);
        };
        let strings = values
            .iter()
            .map(|&s| CString::new(s))
            .collect::<std::result::Result<Vec<CString>, NulError>>()?;
        let mut ptrs: Vec<*const c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        ptrs.push(ptr::null());
        Ok(Some(CStringArray {
            _strings: strings,
            ptrs,
        }))
    }

    fn as_ptr(array: &Option<Self>) -> *const *const c_char {
        array.as_ref().map_or(ptr::null(), |a| a.ptrs.as_ptr())
    }
}

/// An open GDAL raster dataset.
///
/// Owns the native handle: it is closed exactly once, either by
/// [`RasterDataset::close`] or on drop. Both consume the value, so a closed
/// dataset cannot be used again:
///
/// ```compile_fail
/// # use geode::RasterDataset;
/// let dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
/// dataset.close().unwrap();
/// dataset.raster_count();
/// ```
#[derive(Debug)]
pub struct RasterDataset {
    c_dataset: GDALDatasetH,
}

// GDAL Docs state: The returned dataset should only be accessed by one thread at a time.
// See: https://gdal.org/api/raster_c_api.html#_CPPv48GDALOpenPKc10GDALAccess
#[cfg(major_ge_3)]
unsafe impl Send for RasterDataset {}

impl RasterDataset {
    /// Opens the dataset at `path` read-only.
    ///
    /// Opens with [`OpenFlags::VERBOSE_ERROR`], so a failure carries the
    /// driver's reason.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<RasterDataset> {
        Self::open_ex(
            path,
            DatasetOptions {
                open_flags: OpenFlags::RASTER | OpenFlags::VERBOSE_ERROR,
                ..DatasetOptions::default()
            },
        )
    }

    pub fn open_ex<P: AsRef<Path>>(path: P, options: DatasetOptions) -> Result<RasterDataset> {
        _register_drivers();
        let path = path.as_ref();
        let c_filename = _path_to_c_string(path)?;

        let c_allowed_drivers = CStringArray::new(options.allowed_drivers)?;
        let c_open_options = CStringArray::new(options.open_options)?;
        let c_sibling_files = CStringArray::new(options.sibling_files)?;

        // Errors raised by earlier calls must not be reported for this open.
        unsafe { gdal_sys::CPLErrorReset() };
        let c_dataset = unsafe {
            gdal_sys::GDALOpenEx(
                c_filename.as_ptr(),
                options.open_flags.bits(),
                CStringArray::as_ptr(&c_allowed_drivers),
                CStringArray::as_ptr(&c_open_options),
                CStringArray::as_ptr(&c_sibling_files),
            )
        };
        if c_dataset.is_null() {
            let mut msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() });
            unsafe { gdal_sys::CPLErrorReset() };
            if msg.is_empty() {
                msg = "not recognized as a supported dataset".to_string();
            }
            return Err(DatasetError::DatasetOpenFailed {
                path: path.display().to_string(),
                msg,
            });
        }
        log::debug!("opened '{}' ({:?})", path.display(), options.open_flags);
        Ok(RasterDataset { c_dataset })
    }

    /// Creates a writable dataset through the driver named `driver_name`.
    pub fn create<P: AsRef<Path>>(
        driver_name: &str,
        path: P,
        size: (usize, usize),
        bands: usize,
    ) -> Result<RasterDataset> {
        Driver::get(driver_name)?.create_with_band_type::<f32, _>(path, size, bands)
    }

    /// An `f32` dataset held by the `MEM` driver.
    pub fn create_in_memory(size: (usize, usize), bands: usize) -> Result<RasterDataset> {
        Self::create("MEM", "", size, bands)
    }

    /// Creates a new RasterDataset by wrapping a C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer, which is owned from now on.
    pub unsafe fn from_c_dataset(c_dataset: GDALDatasetH) -> RasterDataset {
        RasterDataset { c_dataset }
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_dataset(&self) -> GDALDatasetH {
        self.c_dataset
    }

    /// Flushes and closes the dataset, reporting failures the driver raises on close.
    pub fn close(mut self) -> Result<()> {
        let c_dataset = std::mem::replace(&mut self.c_dataset, null_mut());
        log::debug!("closing dataset");
        #[cfg(any(major_ge_4, all(major_is_3, minor_ge_7)))]
        {
            let rv = unsafe { gdal_sys::GDALClose(c_dataset) };
            if rv != CPLErr::CE_None {
                return Err(_last_cpl_err(rv));
            }
        }
        #[cfg(not(any(major_ge_4, all(major_is_3, minor_ge_7))))]
        unsafe {
            gdal_sys::GDALClose(c_dataset);
        }
        Ok(())
    }

    pub fn driver(&self) -> Driver {
        unsafe {
            let c_driver = gdal_sys::GDALGetDatasetDriver(self.c_dataset);
            Driver::from_c_driver(c_driver)
        }
    }

    pub fn raster_count(&self) -> usize {
        (unsafe { gdal_sys::GDALGetRasterCount(self.c_dataset) }) as usize
    }

    pub fn raster_size(&self) -> (usize, usize) {
        let size_x = unsafe { gdal_sys::GDALGetRasterXSize(self.c_dataset) } as usize;
        let size_y = unsafe { gdal_sys::GDALGetRasterYSize(self.c_dataset) } as usize;
        (size_x, size_y)
    }

    /// The band at 1-based `index`; `InvalidBand` outside `1..=raster_count()`.
    ///
    /// The band borrows the dataset shared, yet [`RasterBand::write`] and
    /// [`RasterBand::set_no_data_value`] mutate it. This mirrors GDAL, where a
    /// band handle is always writable. `RasterDataset` is not `Sync`, so every
    /// band of a dataset stays on the thread that owns it:
    ///
    /// ```compile_fail
    /// # use geode::RasterDataset;
    /// let dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
    /// std::thread::scope(|s| {
    ///     s.spawn(|| dataset.rasterband(1).unwrap().no_data_value());
    /// });
    /// ```
    pub fn rasterband(&self, index: usize) -> Result<RasterBand<'_>> {
        let count = self.raster_count();
        if index == 0 || index > count {
            return Err(DatasetError::InvalidBand { index, count });
        }
        unsafe {
            let c_band = gdal_sys::GDALGetRasterBand(self.c_dataset, index as c_int);
            if c_band.is_null() {
                return Err(_last_null_pointer_err("GDALGetRasterBand"));
            }
            Ok(RasterBand::from_c_rasterband(self, c_band, index))
        }
    }

    pub fn band_type(&self, index: usize) -> Result<GDALDataType::Type> {
        Ok(self.rasterband(index)?.band_type())
    }

    /// Reads the full extent of each band in `bands` as `f32`.
    ///
    /// Every index is checked before any data is read; the first failing
    /// band aborts the call.
    pub fn read_raster_data(&self, bands: &[usize]) -> Result<BTreeMap<usize, Vec<f32>>> {
        let count = self.raster_count();
        if let Some(&index) = bands.iter().find(|&&i| i == 0 || i > count) {
            return Err(DatasetError::InvalidBand { index, count });
        }
        bands
            .iter()
            .map(|&index| Ok((index, self.rasterband(index)?.read_band_as::<f32>()?)))
            .collect()
    }

    /// Generic full extent read of one band.
    pub fn read_band_as<T: GdalType>(&self, index: usize) -> Result<Vec<T>> {
        self.rasterband(index)?.read_band_as::<T>()
    }

    #[cfg(feature = "ndarray")]
    pub fn read_band_as_array(&self, index: usize) -> Result<ndarray::Array2<f32>> {
        self.rasterband(index)?.read_band_as_array::<f32>()
    }

    /// Writes `data`, a row-major `x_size` by `y_size` buffer, over the full extent of `band`.
    pub fn write_raster_data(
        &mut self,
        band: usize,
        data: &[f32],
        x_size: usize,
        y_size: usize,
    ) -> Result<()> {
        let mut rasterband = self.rasterband(band)?;
        let samples = sample_count((x_size, y_size))?;
        if data.len() != samples {
            return Err(DatasetError::DimensionMismatch {
                expected: format!("{samples} samples ({x_size}x{y_size})"),
                actual: format!("{} samples", data.len()),
            });
        }
        let band_size = rasterband.size();
        if band_size != (x_size, y_size) {
            return Err(DatasetError::DimensionMismatch {
                expected: format!("{}x{}", band_size.0, band_size.1),
                actual: format!("{x_size}x{y_size}"),
            });
        }
        rasterband
            .write((0, 0), band_size, band_size, data)
            .map_err(|e| DatasetError::WriteFailed {
                band,
                source: Box::new(e),
            })
    }

    /// Approximate statistics of `band`; GDAL may sample overviews or a subset of blocks.
    pub fn compute_statistics(&self, band: usize) -> Result<BandStatistics> {
        self.statistics(band, true)
    }

    /// Statistics over every pixel of `band`.
    pub fn compute_statistics_exact(&self, band: usize) -> Result<BandStatistics> {
        self.statistics(band, false)
    }

    fn statistics(&self, band: usize, approx_ok: bool) -> Result<BandStatistics> {
        let rasterband = self.rasterband(band)?;
        rasterband.compute_statistics(approx_ok).map_err(|e| {
            log::warn!("statistics of band {band} failed: {e}");
            DatasetError::StatisticsComputationFailed {
                band,
                source: Box::new(e),
            }
        })
    }

    /// Affine transform from pixel/line to georeferenced coordinates.
    ///
    /// Fails when the dataset carries no geotransform.
    pub fn geo_transform(&self) -> Result<GeoTransform> {
        let mut transformation = GeoTransform::default();
        let rv =
            unsafe { gdal_sys::GDALGetGeoTransform(self.c_dataset, transformation.as_mut_ptr()) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(transformation)
    }

    pub fn set_geo_transform(&mut self, transformation: &GeoTransform) -> Result<()> {
        let rv = unsafe {
            gdal_sys::GDALSetGeoTransform(self.c_dataset, transformation.as_ptr() as *mut f64)
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// The georeferenced extent of the raster.
    pub fn bounds(&self) -> Result<Rect<f64>> {
        Ok(self.geo_transform()?.bounds(self.raster_size()))
    }

    /// Projection as WKT, empty when the dataset is not georeferenced.
    pub fn projection(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetProjectionRef(self.c_dataset) };
        _string(rv)
    }

    pub fn set_projection(&mut self, projection: &str) -> Result<()> {
        let c_projection = CString::new(projection)?;
        let rv = unsafe { gdal_sys::GDALSetProjection(self.c_dataset, c_projection.as_ptr()) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn spatial_ref(&self) -> Result<SpatialRef> {
        let projection = self.projection();
        if projection.is_empty() {
            return Err(DatasetError::BadArgument(
                "dataset has no projection".to_string(),
            ));
        }
        SpatialRef::from_wkt(&projection)
    }
}

impl MajorObject for RasterDataset {
    unsafe fn gdal_object_ptr(&self) -> GDALMajorObjectH {
        self.c_dataset
    }
}

impl Metadata for RasterDataset {}

impl Drop for RasterDataset {
    fn drop(&mut self) {
        if !self.c_dataset.is_null() {
            unsafe {
                gdal_sys::GDALClose(self.c_dataset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::assert_near;
    use crate::test_utils::{mem_dataset, SuppressGDALErrorLog, TempFixture};

    fn gtiff_2x2(fixture: &TempFixture) {
        let mut dataset = RasterDataset::create("GTiff", fixture.path(), (2, 2), 1).unwrap();
        dataset
            .write_raster_data(1, &[1.0, 2.0, 3.0, 4.0], 2, 2)
            .unwrap();
        dataset
            .set_geo_transform(&[100.0, 10.0, 0.0, 200.0, 0.0, -10.0])
            .unwrap();
        dataset.close().unwrap();
    }

    #[test]
    fn test_open_missing_file() {
        let _nolog = SuppressGDALErrorLog::new();
        let err = RasterDataset::open("/does/not/exist.tif").unwrap_err();
        match err {
            DatasetError::DatasetOpenFailed { path, msg } => {
                assert_eq!(path, "/does/not/exist.tif");
                assert!(!msg.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_ignores_stale_error() {
        let _nolog = SuppressGDALErrorLog::new();
        let msg = CString::new("stale failure").unwrap();
        unsafe { gdal_sys::CPLError(CPLErr::CE_Failure, 1, msg.as_ptr()) };

        let err = RasterDataset::open("/does/not/exist.tif").unwrap_err();
        match err {
            DatasetError::DatasetOpenFailed { msg, .. } => {
                assert!(!msg.contains("stale failure"), "{msg}");
                assert!(msg.contains("/does/not/exist.tif"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_gtiff_scenario() {
        let fixture = TempFixture::empty("scenario.tif");
        gtiff_2x2(&fixture);

        let dataset = RasterDataset::open(fixture.path()).unwrap();
        assert_eq!(dataset.raster_count(), 1);
        assert_eq!(dataset.raster_size(), (2, 2));
        assert_eq!(dataset.driver().short_name(), "GTiff");

        let data = dataset.read_raster_data(&[1]).unwrap();
        assert_eq!(data, BTreeMap::from([(1, vec![1.0, 2.0, 3.0, 4.0])]));

        let statistics = dataset.compute_statistics(1).unwrap();
        assert_eq!(statistics.min, 1.0);
        assert_eq!(statistics.max, 4.0);
        assert_near!(statistics.mean, 2.5, epsilon = 1e-9);

        let bounds = dataset.bounds().unwrap();
        assert_near!(bounds.min().x, 100.0, epsilon = 1e-9);
        assert_near!(bounds.max().x, 120.0, epsilon = 1e-9);
        assert_near!(bounds.min().y, 180.0, epsilon = 1e-9);
        assert_near!(bounds.max().y, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_open_ex_allowed_drivers() {
        let fixture = TempFixture::empty("allowed.tif");
        gtiff_2x2(&fixture);

        let _nolog = SuppressGDALErrorLog::new();
        let err = RasterDataset::open_ex(
            fixture.path(),
            DatasetOptions {
                allowed_drivers: Some(&["PNG"]),
                ..DatasetOptions::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::DatasetOpenFailed { .. }));

        let dataset = RasterDataset::open_ex(
            fixture.path(),
            DatasetOptions {
                allowed_drivers: Some(&["GTiff"]),
                ..DatasetOptions::default()
            },
        )
        .unwrap();
        assert_eq!(dataset.driver().short_name(), "GTiff");
    }

    #[test]
    fn test_update_file_backed_dataset() {
        let fixture = TempFixture::empty("update.tif");
        gtiff_2x2(&fixture);

        let mut dataset = RasterDataset::open_ex(
            fixture.path(),
            DatasetOptions {
                open_flags: OpenFlags::UPDATE | OpenFlags::RASTER,
                ..DatasetOptions::default()
            },
        )
        .unwrap();
        dataset
            .write_raster_data(1, &[9.0, 9.0, 9.0, 9.0], 2, 2)
            .unwrap();
        dataset.close().unwrap();

        let dataset = RasterDataset::open(fixture.path()).unwrap();
        assert_eq!(dataset.read_band_as::<f32>(1).unwrap(), vec![9.0; 4]);
    }

    #[test]
    fn test_invalid_band() {
        let mut dataset = RasterDataset::create_in_memory((2, 2), 2).unwrap();
        for index in [0, 3] {
            assert_eq!(
                dataset.read_raster_data(&[1, index]).unwrap_err(),
                DatasetError::InvalidBand { index, count: 2 }
            );
            assert_eq!(
                dataset
                    .write_raster_data(index, &[0.0; 4], 2, 2)
                    .unwrap_err(),
                DatasetError::InvalidBand { index, count: 2 }
            );
            assert_eq!(
                dataset.compute_statistics(index).unwrap_err(),
                DatasetError::InvalidBand { index, count: 2 }
            );
        }
    }

    #[test]
    fn test_write_read_roundtrip() {
        let mut dataset = RasterDataset::create_in_memory((3, 2), 2).unwrap();
        let first = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5];
        let second = [-1.0, 0.0, 1.0, 2.0, 3.0, f32::MAX];
        dataset.write_raster_data(1, &first, 3, 2).unwrap();
        dataset.write_raster_data(2, &second, 3, 2).unwrap();

        let data = dataset.read_raster_data(&[2, 1]).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[&1], first);
        assert_eq!(data[&2], second);
    }

    #[test]
    fn test_write_dimension_mismatch() {
        let mut dataset = RasterDataset::create_in_memory((3, 2), 1).unwrap();
        assert!(matches!(
            dataset.write_raster_data(1, &[0.0; 5], 3, 2),
            Err(DatasetError::DimensionMismatch { .. })
        ));
        // consistent buffer, but not the band size
        assert!(matches!(
            dataset.write_raster_data(1, &[0.0; 6], 2, 3),
            Err(DatasetError::DimensionMismatch { .. })
        ));
        assert_eq!(dataset.read_band_as::<f32>(1).unwrap(), vec![0.0; 6]);
    }

    #[test]
    fn test_write_size_overflow() {
        let mut dataset = RasterDataset::create_in_memory((3, 2), 1).unwrap();
        assert!(matches!(
            dataset.write_raster_data(1, &[], usize::MAX, 2),
            Err(DatasetError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_band_write_through_shared_borrow() {
        let dataset = RasterDataset::create_in_memory((2, 1), 1).unwrap();
        let mut band = dataset.rasterband(1).unwrap();
        band.write((0, 0), (2, 1), (2, 1), &[3.0f32, 4.0]).unwrap();
        assert_eq!(dataset.read_raster_data(&[1]).unwrap()[&1], vec![3.0, 4.0]);
    }

    #[test]
    fn test_constant_band_statistics() {
        let dataset = mem_dataset((4, 3), &[7.25f32; 12]);
        let expected = BandStatistics {
            min: 7.25,
            max: 7.25,
            mean: 7.25,
            std_dev: 0.0,
        };
        let statistics = dataset.compute_statistics(1).unwrap();
        assert_near!(BandStatistics, statistics, expected, epsilon = 1e-9);
        let statistics = dataset.compute_statistics_exact(1).unwrap();
        assert_near!(BandStatistics, statistics, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_statistics_all_nodata() {
        let dataset = mem_dataset((2, 2), &[-9999.0f32; 4]);
        dataset
            .rasterband(1)
            .unwrap()
            .set_no_data_value(Some(-9999.0))
            .unwrap();
        let _nolog = SuppressGDALErrorLog::new();
        let err = dataset.compute_statistics_exact(1).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::StatisticsComputationFailed { band: 1, .. }
        ));
    }

    #[test]
    fn test_geo_transform_roundtrip() {
        let mut dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
        let transform: GeoTransform = [-180.0, 0.25, 0.01, 90.0, -0.02, -0.25];
        dataset.set_geo_transform(&transform).unwrap();
        let read = dataset.geo_transform().unwrap();
        for (actual, expected) in read.iter().zip(transform.iter()) {
            assert_near!(*actual, *expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_missing_geo_transform() {
        let _nolog = SuppressGDALErrorLog::new();
        let dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
        assert!(matches!(
            dataset.geo_transform(),
            Err(DatasetError::GdalError { .. })
        ));
        assert!(matches!(
            dataset.bounds(),
            Err(DatasetError::GdalError { .. })
        ));
    }

    #[test]
    fn test_projection() {
        let mut dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
        assert_eq!(dataset.projection(), "");
        assert!(dataset.spatial_ref().is_err());

        let wkt = SpatialRef::from_epsg(4326).unwrap().to_wkt().unwrap();
        dataset.set_projection(&wkt).unwrap();
        assert_eq!(dataset.spatial_ref().unwrap().auth_code(), Some(4326));
    }

    #[test]
    fn test_dataset_metadata() {
        let mut dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
        let entries = HashMap::from([("K".to_string(), "V".to_string())]);
        dataset.set_metadata(&entries).unwrap();
        assert_eq!(dataset.metadata().get("K").map(String::as_str), Some("V"));
    }

    #[test]
    fn test_band_type() {
        let dataset = mem_dataset((2, 1), &[1u16, 2]);
        assert_eq!(dataset.band_type(1).unwrap(), GDALDataType::GDT_UInt16);
        assert_eq!(dataset.read_band_as::<u16>(1).unwrap(), vec![1, 2]);
        assert!(dataset.band_type(2).is_err());
    }

    #[test]
    fn test_close_and_drop() {
        let dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
        dataset.close().unwrap();

        let dataset = RasterDataset::create_in_memory((2, 2), 1).unwrap();
        drop(dataset);
    }

    #[cfg(major_ge_3)]
    #[test]
    fn test_send_to_thread() {
        let dataset = mem_dataset((2, 2), &[1.0f32, 2.0, 3.0, 4.0]);
        let data = std::thread::spawn(move || dataset.read_band_as::<f32>(1).unwrap())
            .join()
            .unwrap();
        assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
