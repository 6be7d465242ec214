// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.
//!
//! Everything a worker needs to know about the picture it is drawing
//! sits behind the `Fractal` trait: hand it a pixel, get back a colour
//! index.  Evaluation is pure, which is what lets any number of
//! workers share one fractal without locking.

use num::Complex;

use errors::{RenderError, Result};
use planes::{Pixel, PlaneMapper};
use raster::COLOR_INDICES;

/// Anything that can colour a pixel.  Shared by reference across all
/// worker threads.
pub trait Fractal: Sync {
    /// The colour index of the given pixel.
    fn at(&self, pixel: Pixel) -> u8;
}

/// This is our classic iterator function: the number of iterations
/// it took `z <- z^2 + c` to leave the bailout circle, or
/// `max_iterations` if it never did.  A point that is outside the
/// circle after the very first step returns 0.
#[inline]
pub fn escape_time(c: Complex<f64>, bailout: f64, max_iterations: usize) -> usize {
    let limit = bailout * bailout;
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for i in 0..max_iterations {
        z = z * z + c;
        if z.norm_sqr() >= limit {
            return i;
        }
    }
    max_iterations
}

/// The Mandelbrot set, drawn over the window a `PlaneMapper`
/// describes.  Once built, this object should not be mutable.
#[derive(Copy, Clone, Debug)]
pub struct Mandelbrot {
    plane: PlaneMapper,
    bailout: f64,
    max_iterations: usize,
}

impl Mandelbrot {
    /// Checks the parameters up front; in particular every possible
    /// iteration count, 0 through `max_iterations`, has to fit in a
    /// one-byte colour index.
    pub fn new(plane: PlaneMapper, bailout: f64, max_iterations: usize) -> Result<Self> {
        if !(bailout.is_finite() && bailout > 0.0) {
            return Err(RenderError::InvalidParameter(format!(
                "bailout radius must be positive, got {}",
                bailout
            )));
        }
        if max_iterations == 0 {
            return Err(RenderError::InvalidParameter(
                "at least one iteration is required".to_string(),
            ));
        }
        if max_iterations + 1 > COLOR_INDICES {
            return Err(RenderError::ColorDepthOverflow {
                colors: max_iterations + 1,
                available: COLOR_INDICES,
            });
        }
        Ok(Mandelbrot {
            plane,
            bailout,
            max_iterations,
        })
    }

    /// The pixel-to-plane mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The bailout radius.
    pub fn bailout(&self) -> f64 {
        self.bailout
    }

    /// The iteration cap, which is also the largest value `at` returns.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Escape time of the point under `pixel`.
    pub fn iterations(&self, pixel: &Pixel) -> usize {
        escape_time(
            self.plane.pixel_to_point(pixel),
            self.bailout,
            self.max_iterations,
        )
    }
}

impl Fractal for Mandelbrot {
    fn at(&self, pixel: Pixel) -> u8 {
        self.iterations(&pixel) as u8
    }
}
