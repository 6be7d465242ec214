// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between reading a configuration and
//! writing the finished image.

use std::io;
use std::result;

/// The single error type of the renderer.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The image cannot be split into the requested number of strips.
    #[fail(display = "cannot split {} columns into {} strips", width, parts)]
    InvalidPartition {
        /// Width of the image, in pixels.
        width: usize,
        /// Number of strips requested.
        parts: usize,
    },

    /// More iteration counts than the output can hold as colour indices.
    #[fail(
        display = "{} colour indices are needed but the output holds only {}",
        colors, available
    )]
    ColorDepthOverflow {
        /// Colour indices the iteration limit requires.
        colors: usize,
        /// Colour indices the output format can represent.
        available: usize,
    },

    /// A rendering parameter makes no sense.
    #[fail(display = "invalid parameter: {}", _0)]
    InvalidParameter(String),

    /// The finished image could not be written.
    #[fail(display = "could not write {}: {}", path, cause)]
    EncodingFailure {
        /// Destination that failed.
        path: String,
        /// What the filesystem or encoder reported.
        #[cause]
        cause: io::Error,
    },

    /// A worker thread died; partial images are never returned.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The render was cancelled before every pixel was computed.
    #[fail(display = "render cancelled after {} of {} pixels", rendered, total)]
    Cancelled {
        /// Pixels finished before the workers stopped.
        rendered: usize,
        /// Pixels in the whole image.
        total: usize,
    },
}

/// Shorthand used throughout the crate.
pub type Result<T> = result::Result<T, RenderError>;
