use std::mem::MaybeUninit;

use geo_types::{coord, Rect};

use crate::errors::{DatasetError, Result};

/// An affine transform.
///
/// A six-element array storing the coefficients mapping pixel/line `(P, L)`
/// raster space to `(Xp, Yp)` georeferenced space:
///
///   * `GeoTransform[0]`: x-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[1]`: W-E pixel resolution (pixel width).
///   * `GeoTransform[2]`: row rotation (typically zero).
///   * `GeoTransform[3]`: y-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[4]`: column rotation (typically zero).
///   * `GeoTransform[5]`: N-S pixel resolution (pixel height), negative value for a North-up image.
///
/// ```text
/// Xp = GT[0] + P * GT[1] + L * GT[2]
/// Yp = GT[3] + P * GT[4] + L * GT[5]
/// ```
pub type GeoTransform = [f64; 6];

/// Extension methods on [`GeoTransform`]
pub trait GeoTransformEx {
    /// Apply the transform to a pixel/line coordinate. Wraps `GDALApplyGeoTransform`.
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64);

    /// Invert the transform. Wraps `GDALInvGeoTransform`.
    fn invert(&self) -> Result<GeoTransform>;

    /// Georeferenced extent covered by a raster of `size` pixels.
    fn bounds(&self, size: (usize, usize)) -> Rect<f64>;
}

impl GeoTransformEx for GeoTransform {
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64) {
        let mut geo_x = MaybeUninit::<f64>::uninit();
        let mut geo_y = MaybeUninit::<f64>::uninit();
        unsafe {
            gdal_sys::GDALApplyGeoTransform(
                self.as_ptr() as *mut f64,
                pixel,
                line,
                geo_x.as_mut_ptr(),
                geo_y.as_mut_ptr(),
            );
            (geo_x.assume_init(), geo_y.assume_init())
        }
    }

    fn invert(&self) -> Result<GeoTransform> {
        let mut gt_out = MaybeUninit::<GeoTransform>::uninit();
        let rv = unsafe {
            gdal_sys::GDALInvGeoTransform(
                self.as_ptr() as *mut f64,
                (*gt_out.as_mut_ptr()).as_mut_ptr(),
            )
        };
        if rv == 0 {
            return Err(DatasetError::BadArgument(
                "Geo transform is uninvertible".to_string(),
            ));
        }
        let result = unsafe { gt_out.assume_init() };
        Ok(result)
    }

    fn bounds(&self, size: (usize, usize)) -> Rect<f64> {
        let (width, height) = (size.0 as f64, size.1 as f64);
        // all four corners, the transform may be rotated
        let corners = [
            self.apply(0., 0.),
            self.apply(width, 0.),
            self.apply(0., height),
            self.apply(width, height),
        ];
        let (mut min_x, mut min_y) = corners[0];
        let (mut max_x, mut max_y) = corners[0];
        for (x, y) in &corners[1..] {
            min_x = min_x.min(*x);
            min_y = min_y.min(*y);
            max_x = max_x.max(*x);
            max_y = max_y.max(*y);
        }
        Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_near;

    #[test]
    fn test_apply_and_invert() {
        let transform: GeoTransform = [768269., 0.6, 0., 4057292., 0., -0.6];
        let (x, y) = transform.apply(10., 20.);
        assert_near!(x, 768275., epsilon = 1e-6);
        assert_near!(y, 4057280., epsilon = 1e-6);

        let inverse = transform.invert().unwrap();
        let (p, l) = inverse.apply(x, y);
        assert_near!(p, 10., epsilon = 1e-6);
        assert_near!(l, 20., epsilon = 1e-6);
    }

    #[test]
    fn test_invert_degenerate() {
        let transform: GeoTransform = [0., 0., 0., 0., 0., 0.];
        assert!(transform.invert().is_err());
    }

    #[test]
    fn test_bounds_north_up() {
        let transform: GeoTransform = [10., 0.1, 0., 50., 0., -0.1];
        let bounds = transform.bounds((4, 2));
        assert_near!(bounds.min().x, 10., epsilon = 1e-12);
        assert_near!(bounds.max().x, 10.4, epsilon = 1e-12);
        assert_near!(bounds.min().y, 49.8, epsilon = 1e-12);
        assert_near!(bounds.max().y, 50., epsilon = 1e-12);
    }
}
