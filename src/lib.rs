#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  The escape-time picture colours
//! every point by how many of those steps it took to leave a circle of
//! a given radius; points that never leave get the iteration cap.
//!
//! The image is cut into vertical strips, one per CPU.  Each strip is
//! drawn by its own thread, which writes straight into its own slice
//! of the image and reports a running pixel count over a rendezvous
//! channel.  A coordinator polls all of those channels in rounds and
//! sums the latest counts into a single progress figure; the render is
//! complete when every channel has closed.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate tempfile;

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod fractal;
pub mod output;
pub mod palette;
pub mod partition;
pub mod planes;
pub mod raster;
pub mod render;
pub mod worker;

pub use config::RenderConfig;
pub use errors::{RenderError, Result};
pub use fractal::{Fractal, Mandelbrot};
pub use planes::{ComplexWindow, Pixel, PlaneMapper, Rect};
pub use raster::{IndexedImage, Region};
pub use render::render;
pub use worker::{cancel_pair, CancelHandle, CancelSignal};
