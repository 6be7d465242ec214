// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a finished image to disk.  PNG unless the file name ends in
//! `.ppm` or `.pnm`, in which case a binary pixmap.

use std::fs::File;
use std::io;
use std::path::Path;

use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::{ColorType, Rgb};

use errors::{RenderError, Result};
use raster::IndexedImage;

/// Looks every colour index up in `palette` and returns packed,
/// row-major RGB bytes.
pub fn to_rgb(img: &IndexedImage, palette: &[Rgb<u8>]) -> Result<Vec<u8>> {
    let mut pixels = Vec::with_capacity(img.len() * 3);
    for index in img.rows() {
        match palette.get(index as usize) {
            Some(colour) => pixels.extend_from_slice(&colour.0),
            None => {
                return Err(RenderError::InvalidParameter(format!(
                    "colour index {} is outside a palette of {}",
                    index,
                    palette.len()
                )))
            }
        }
    }
    Ok(pixels)
}

fn encode(path: &Path, pixels: &[u8], width: u32, height: u32) -> io::Result<()> {
    let output = File::create(path)?;
    let pnm = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("ppm") || ext.eq_ignore_ascii_case("pnm"),
        None => false,
    };
    if pnm {
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
        encoder.encode(pixels, width, height, ColorType::RGB(8))
    } else {
        PNGEncoder::new(output).encode(pixels, width, height, ColorType::RGB(8))
    }
}

/// Writes `img` to `path`, colouring it with `palette`.  The image
/// itself is untouched whatever happens.
pub fn write_image<P: AsRef<Path>>(path: P, img: &IndexedImage, palette: &[Rgb<u8>]) -> Result<()> {
    let path = path.as_ref();
    let limit = u32::max_value() as usize;
    if img.width() > limit || img.height() > limit {
        return Err(RenderError::InvalidParameter(format!(
            "image of {}x{} pixels is too large to encode",
            img.width(),
            img.height()
        )));
    }
    let pixels = to_rgb(img, palette)?;
    encode(path, &pixels, img.width() as u32, img.height() as u32).map_err(|cause| {
        RenderError::EncodingFailure {
            path: path.display().to_string(),
            cause,
        }
    })?;
    info!("wrote {}", path.display());
    Ok(())
}
