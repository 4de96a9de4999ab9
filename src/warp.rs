//! Reprojection of a [`RasterDataset`] into another coordinate system.
//!
//! The destination grid is the one GDAL suggests for the source extent in the
//! target system (`GDALSuggestedWarpOutput2`), the pixels are then resampled
//! with `GDALReprojectImage` into an in-memory dataset.

use std::ffi::c_void;
use std::ptr::{null, null_mut};

use gdal_sys::{self, CPLErr, GDALResampleAlg};
use libc::c_int;

use crate::cpl::CslStringList;
use crate::dataset::RasterDataset;
use crate::driver::Driver;
use crate::errors::*;
use crate::geo_transform::GeoTransform;
use crate::spatial_ref::{CoordTransform, SpatialRef};
use crate::utils::{_last_cpl_err, _last_null_pointer_err};

/// Resampling algorithms available to [`RasterDataset::reproject_with`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u32)]
pub enum ResampleAlg {
    /// Nearest neighbour (select on one input pixel)
    #[default]
    NearestNeighbour = GDALResampleAlg::GRA_NearestNeighbour,
    /// Bilinear (2x2 kernel)
    Bilinear = GDALResampleAlg::GRA_Bilinear,
    /// Cubic Convolution Approximation (4x4 kernel)
    Cubic = GDALResampleAlg::GRA_Cubic,
    /// Cubic B-Spline Approximation (4x4 kernel)
    CubicSpline = GDALResampleAlg::GRA_CubicSpline,
    /// Lanczos windowed sinc interpolation (6x6 kernel)
    Lanczos = GDALResampleAlg::GRA_Lanczos,
    /// Average of all non-NODATA contributing pixels
    Average = GDALResampleAlg::GRA_Average,
    /// Value which appears most often of all the sampled points
    Mode = GDALResampleAlg::GRA_Mode,
    Max = GDALResampleAlg::GRA_Max,
    Min = GDALResampleAlg::GRA_Min,
    Med = GDALResampleAlg::GRA_Med,
    Q1 = GDALResampleAlg::GRA_Q1,
    Q3 = GDALResampleAlg::GRA_Q3,
}

impl ResampleAlg {
    pub fn to_gdal(&self) -> GDALResampleAlg::Type {
        *self as GDALResampleAlg::Type
    }
}

/// Settings for [`RasterDataset::reproject_with`].
#[derive(Debug, Clone, Default)]
pub struct ReprojectOptions {
    resampling: ResampleAlg,
    max_error: f64,
    memory_limit: f64,
}

impl ReprojectOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_resampling(&mut self, alg: ResampleAlg) -> &mut Self {
        self.resampling = alg;
        self
    }

    pub fn resampling(&self) -> ResampleAlg {
        self.resampling
    }

    /// Maximum error, in pixels, of the approximating transformer.
    ///
    /// `0.0` (default) transforms every pixel exactly.
    pub fn with_max_error(&mut self, max_error: f64) -> &mut Self {
        self.max_error = max_error;
        self
    }

    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Working memory in bytes, `0` uses the GDAL default.
    pub fn with_memory_limit(&mut self, limit_bytes: usize) -> &mut Self {
        self.memory_limit = limit_bytes as f64;
        self
    }

    pub fn memory_limit(&self) -> usize {
        self.memory_limit as usize
    }
}

// Transformer argument of GDALCreateGenImgProjTransformer2.
struct GenImgProjTransformer(*mut c_void);

impl GenImgProjTransformer {
    fn new(source: &RasterDataset, options: &CslStringList) -> Result<Self> {
        let c_transformer = unsafe {
            gdal_sys::GDALCreateGenImgProjTransformer2(
                source.c_dataset(),
                null_mut(),
                options.as_ptr() as _,
            )
        };
        if c_transformer.is_null() {
            return Err(_last_null_pointer_err("GDALCreateGenImgProjTransformer2"));
        }
        Ok(GenImgProjTransformer(c_transformer))
    }

    /// Destination geotransform and pixel size covering the whole source.
    fn suggested_output(
        &self,
        source: &RasterDataset,
    ) -> Result<(GeoTransform, (usize, usize))> {
        let mut geo_transform = GeoTransform::default();
        let mut pixels: c_int = 0;
        let mut lines: c_int = 0;
        let mut extent = [0.0f64; 4];
        let rv = unsafe {
            gdal_sys::GDALSuggestedWarpOutput2(
                source.c_dataset(),
                Some(gdal_sys::GDALGenImgProjTransform),
                self.0,
                geo_transform.as_mut_ptr(),
                &mut pixels,
                &mut lines,
                extent.as_mut_ptr(),
                0,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok((geo_transform, (pixels as usize, lines as usize)))
    }
}

impl Drop for GenImgProjTransformer {
    fn drop(&mut self) {
        unsafe { gdal_sys::GDALDestroyGenImgProjTransformer(self.0) };
    }
}

fn reprojection_failed(step: &str) -> impl Fn(DatasetError) -> DatasetError + '_ {
    move |e| DatasetError::ReprojectionFailed(format!("{step}: {e}"))
}

impl RasterDataset {
    /// Reprojects into `target`, anything GDAL accepts as a spatial reference
    /// definition (`"EPSG:3857"`, WKT, PROJ strings), with default options.
    pub fn reproject(&self, target: &str) -> Result<RasterDataset> {
        self.reproject_with(target, &ReprojectOptions::default())
    }

    /// Reprojects into `target`, returning a new in-memory dataset with the
    /// band count and band type of `self`.
    pub fn reproject_with(&self, target: &str, options: &ReprojectOptions) -> Result<RasterDataset> {
        let source_wkt = self.projection();
        if source_wkt.is_empty() {
            return Err(DatasetError::ReprojectionFailed(
                "source dataset has no projection".to_string(),
            ));
        }
        let source_srs =
            SpatialRef::from_wkt(&source_wkt).map_err(reprojection_failed("source projection"))?;
        let target_srs = SpatialRef::from_definition(target)
            .map_err(reprojection_failed("target projection"))?;
        CoordTransform::new(&source_srs, &target_srs)
            .map_err(reprojection_failed("coordinate transformation"))?;
        let target_wkt = target_srs.to_wkt()?;

        let mut transformer_options = CslStringList::new();
        transformer_options.set_name_value("DST_SRS", &target_wkt)?;
        let transformer = GenImgProjTransformer::new(self, &transformer_options)
            .map_err(reprojection_failed("transformer"))?;
        let (geo_transform, size) = transformer
            .suggested_output(self)
            .map_err(reprojection_failed("output extent"))?;
        drop(transformer);

        let band_count = self.raster_count();
        if band_count == 0 {
            return Err(DatasetError::ReprojectionFailed(
                "source dataset has no bands".to_string(),
            ));
        }
        let band_type = self.band_type(1)?;
        let mut destination = Driver::get("MEM")?.create_with_data_type(
            "",
            size,
            band_count,
            band_type,
            &CslStringList::new(),
        )?;
        destination.set_projection(&target_wkt)?;
        destination.set_geo_transform(&geo_transform)?;
        for index in 1..=band_count {
            if let Some(no_data) = self.rasterband(index)?.no_data_value() {
                destination.rasterband(index)?.set_no_data_value(Some(no_data))?;
            }
        }

        log::debug!(
            "reprojecting {:?} {}x{} into {target} {}x{} ({:?})",
            source_srs.authority(),
            self.raster_size().0,
            self.raster_size().1,
            size.0,
            size.1,
            options.resampling()
        );
        let rv = unsafe {
            gdal_sys::GDALReprojectImage(
                self.c_dataset(),
                null(),
                destination.c_dataset(),
                null(),
                options.resampling().to_gdal(),
                options.memory_limit,
                options.max_error,
                None,
                null_mut(),
                null_mut(),
            )
        };
        if rv != CPLErr::CE_None {
            return Err(reprojection_failed("warp")(_last_cpl_err(rv)));
        }
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_near;
    use crate::test_utils::{mem_dataset, SuppressGDALErrorLog};

    fn wgs84_dataset() -> RasterDataset {
        let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let mut dataset = mem_dataset((4, 4), &data);
        dataset
            .set_projection(&SpatialRef::from_epsg(4326).unwrap().to_wkt().unwrap())
            .unwrap();
        dataset
            .set_geo_transform(&[10.0, 0.1, 0.0, 50.0, 0.0, -0.1])
            .unwrap();
        dataset
    }

    #[test]
    fn test_reproject_to_web_mercator() {
        let source = wgs84_dataset();
        let reprojected = source.reproject("EPSG:3857").unwrap();

        let (x_size, y_size) = reprojected.raster_size();
        assert!(x_size > 0 && y_size > 0);
        assert_eq!(reprojected.raster_count(), 1);
        assert_eq!(reprojected.band_type(1).unwrap(), source.band_type(1).unwrap());
        assert_eq!(reprojected.driver().short_name(), "MEM");
        assert_eq!(reprojected.spatial_ref().unwrap().auth_code(), Some(3857));

        // 10E..10.4E in web mercator
        let bounds = reprojected.bounds().unwrap();
        assert_near!(bounds.min().x, 1113194.9, epsilon = 1.0);
        // the suggested grid may round up to whole pixels
        assert!(bounds.max().x > 1157720.0 && bounds.max().x < 1180000.0);

        let data = reprojected.read_band_as::<f32>(1).unwrap();
        assert_eq!(data.len(), x_size * y_size);
        assert!(data.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn test_reproject_with_options() {
        let source = wgs84_dataset();
        source
            .rasterband(1)
            .unwrap()
            .set_no_data_value(Some(-1.0))
            .unwrap();
        let reprojected = source
            .reproject_with(
                "EPSG:32632",
                ReprojectOptions::new()
                    .with_resampling(ResampleAlg::Bilinear)
                    .with_max_error(0.125)
                    .with_memory_limit(1 << 20),
            )
            .unwrap();
        assert_eq!(reprojected.spatial_ref().unwrap().auth_code(), Some(32632));
        assert_eq!(reprojected.rasterband(1).unwrap().no_data_value(), Some(-1.0));
    }

    #[test]
    fn test_reproject_without_projection() {
        let source = mem_dataset((2, 2), &[1.0f32; 4]);
        assert_eq!(
            source.reproject("EPSG:3857").unwrap_err(),
            DatasetError::ReprojectionFailed("source dataset has no projection".to_string())
        );
    }

    #[test]
    fn test_reproject_invalid_target() {
        let source = wgs84_dataset();
        let _nolog = SuppressGDALErrorLog::new();
        assert!(matches!(
            source.reproject("EPSG:not-a-code"),
            Err(DatasetError::ReprojectionFailed(_))
        ));
    }

    #[test]
    fn test_options_defaults() {
        let options = ReprojectOptions::new();
        assert_eq!(options.resampling(), ResampleAlg::NearestNeighbour);
        assert_eq!(options.max_error(), 0.0);
        assert_eq!(options.memory_limit(), 0);
        assert_eq!(
            ResampleAlg::Lanczos.to_gdal(),
            GDALResampleAlg::GRA_Lanczos
        );
    }
}
