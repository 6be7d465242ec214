// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colour palettes: a walk around the hue wheel.

use image::Rgb;

/// Converts hue (degrees, `[0, 360)`), saturation and value (both
/// `[0, 1]`) to an 8-bit RGB colour.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb<u8> {
    let hh = h / 60.0;
    let sector = hh as usize;
    let ff = hh - sector as f64;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * ff);
    let t = v * (1.0 - s * (1.0 - ff));

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb([(255.0 * r) as u8, (255.0 * g) as u8, (255.0 * b) as u8])
}

/// `levels` colours spread evenly around the hue wheel.
pub fn generate(levels: usize) -> Vec<Rgb<u8>> {
    (0..levels)
        .map(|i| hsv_to_rgb(360.0 * i as f64 / levels as f64, 0.8, 1.0))
        .collect()
}
