// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane and a window on the
//! complex plane, given by a start corner and an end corner.  Pixel
//! (x0, y0) maps onto the start corner; the end corner sits just past
//! the last pixel.
use num::Complex;

use errors::{RenderError, Result};

/// A rectangle of pixels, `[x0, x1) x [y0, y1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    /// First column.
    pub x0: usize,
    /// First row.
    pub y0: usize,
    /// One past the last column.
    pub x1: usize,
    /// One past the last row.
    pub y1: usize,
}

impl Rect {
    /// A rectangle anchored at 0,0.
    pub fn new(width: usize, height: usize) -> Rect {
        Rect {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    /// The total number of pixels in the rectangle.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// True when the rectangle holds no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The pixel count, or `None` if it does not fit in a `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.width().checked_mul(self.height())
    }

    /// Whether the pixel falls inside the rectangle.
    pub fn contains(&self, pixel: &Pixel) -> bool {
        pixel.0 >= self.x0 && pixel.0 < self.x1 && pixel.1 >= self.y0 && pixel.1 < self.y1
    }
}

/// Describes the x, y of a pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel(pub usize, pub usize);

/// The start and end corners of the window on the complex plane,
/// treating the real part as x and the imaginary part as y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexWindow(pub Complex<f64>, pub Complex<f64>);

/// Maps pixels of an integral rectangle onto a complex window.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The pixel rectangle the image covers.
    pub bounds: Rect,
    /// The part of the complex plane the rectangle is stretched over.
    pub window: ComplexWindow,
}

impl PlaneMapper {
    /// Constructor.  The window may run in either direction along
    /// either axis, but the rectangle must hold at least one pixel and
    /// both corners must be finite.
    pub fn new(bounds: Rect, start: Complex<f64>, end: Complex<f64>) -> Result<PlaneMapper> {
        if bounds.is_empty() {
            return Err(RenderError::InvalidParameter(format!(
                "image of {}x{} pixels is empty",
                bounds.width(),
                bounds.height()
            )));
        }

        if bounds.checked_len().is_none() {
            return Err(RenderError::InvalidParameter(format!(
                "image of {}x{} pixels is too large to address",
                bounds.width(),
                bounds.height()
            )));
        }

        if !(start.re.is_finite() && start.im.is_finite() && end.re.is_finite() && end.im.is_finite())
        {
            return Err(RenderError::InvalidParameter(
                "complex window corners must be finite".to_string(),
            ));
        }

        Ok(PlaneMapper {
            bounds,
            window: ComplexWindow(start, end),
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Never true for a mapper built through `new`.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// complex number at the equivalent location in the window.  Only
    /// pixels inside `bounds` have a meaningful answer.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let ComplexWindow(start, end) = self.window;
        let fx = (pixel.0 - self.bounds.x0) as f64 / self.bounds.width() as f64;
        let fy = (pixel.1 - self.bounds.y0) as f64 / self.bounds.height() as f64;
        Complex::new(
            fx * (end.re - start.re) + start.re,
            fy * (end.im - start.im) + start.im,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_empty_image() {
        let pm = PlaneMapper::new(Rect::new(0, 4), Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_unaddressable_image() {
        let huge = ::std::usize::MAX / 2 + 1;
        let pm = PlaneMapper::new(Rect::new(huge, 2), Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        match pm {
            Err(RenderError::InvalidParameter(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(Rect::new(huge, 2).checked_len(), None);
        assert!(!Rect::new(huge, 2).is_empty());
    }

    #[test]
    fn planemapper_fails_on_nan_corner() {
        let pm = PlaneMapper::new(
            Rect::new(4, 4),
            Complex::new(::std::f64::NAN, -1.0),
            Complex::new(1.0, 1.0),
        );
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_accepts_flipped_window() {
        let pm = PlaneMapper::new(Rect::new(4, 4), Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(Rect::new(5, 5), Complex::new(0.0, 0.0), Complex::new(5.0, 5.0))
            .unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(Rect::new(4, 4), Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0))
            .unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn pixel_to_point_respects_offset_bounds() {
        let bounds = Rect {
            x0: 10,
            y0: 20,
            x1: 14,
            y1: 24,
        };
        let pm = PlaneMapper::new(bounds, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(10, 20)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(12, 22)), Complex::new(0.0, 0.0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(3, 2);
        assert!(r.contains(&Pixel(0, 0)));
        assert!(r.contains(&Pixel(2, 1)));
        assert!(!r.contains(&Pixel(3, 1)));
        assert!(!r.contains(&Pixel(2, 2)));
        assert_eq!(r.len(), 6);
    }
}
