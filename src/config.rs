// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that describes a render, checked before any work starts.

use num::Complex;
use num_cpus;

use errors::{RenderError, Result};
use fractal::Mandelbrot;
use partition::split_columns;
use planes::{PlaneMapper, Rect};
use raster::IndexedImage;
use render::render;
use worker::CancelSignal;

/// Parameters of a single render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Complex point under the top-left pixel.
    pub start: Complex<f64>,
    /// Complex point just past the bottom-right pixel.
    pub end: Complex<f64>,
    /// Escape radius.
    pub bailout: f64,
    /// Iteration cap, and the largest colour index produced.
    pub max_iterations: usize,
    /// Number of strips, and so of worker threads.
    pub parallelism: usize,
}

impl Default for RenderConfig {
    /// A wide, detailed view of one of the Mandelbrot set's spirals,
    /// split across every CPU.
    fn default() -> Self {
        let width = 8096;
        RenderConfig {
            width,
            height: (width as f64 * 0.4459) as usize,
            start: Complex::new(0.276185, 0.479000198),
            end: Complex::new(0.367588933, 0.519762846),
            bailout: 2.0,
            max_iterations: 255,
            parallelism: num_cpus::get(),
        }
    }
}

impl RenderConfig {
    /// The pixel rectangle of the output.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    /// Builds the evaluator this configuration describes.
    pub fn fractal(&self) -> Result<Mandelbrot> {
        let plane = PlaneMapper::new(self.bounds(), self.start, self.end)?;
        Mandelbrot::new(plane, self.bailout, self.max_iterations)
    }

    /// Checks every parameter, including whether the image can be
    /// split `parallelism` ways.
    pub fn validate(&self) -> Result<Mandelbrot> {
        let fractal = self.fractal()?;
        let limit = u32::max_value() as usize;
        if self.width > limit || self.height > limit {
            return Err(RenderError::InvalidParameter(format!(
                "image of {}x{} pixels is too large to encode",
                self.width, self.height
            )));
        }
        split_columns(self.bounds(), self.parallelism)?;
        Ok(fractal)
    }

    /// Validates, then renders.
    pub fn render<R>(&self, report: R, cancel: &CancelSignal) -> Result<IndexedImage>
    where
        R: FnMut(usize),
    {
        let fractal = self.validate()?;
        render(&fractal, self.bounds(), self.parallelism, report, cancel)
    }
}
