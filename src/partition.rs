// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits an image into vertical strips, one per worker.

use errors::{RenderError, Result};
use planes::Rect;

/// Splits `bounds` into `parts` full-height strips.  Every strip but
/// the last is `width / parts` columns wide; the last one also takes
/// whatever columns the division left over, so the strips tile the
/// rectangle with no gaps and no overlap.
pub fn split_columns(bounds: Rect, parts: usize) -> Result<Vec<Rect>> {
    let width = bounds.width();
    if parts == 0 || width < parts {
        return Err(RenderError::InvalidPartition { width, parts });
    }

    let step = width / parts;
    Ok((0..parts)
        .map(|i| Rect {
            x0: bounds.x0 + i * step,
            x1: if i == parts - 1 {
                bounds.x1
            } else {
                bounds.x0 + (i + 1) * step
            },
            y0: bounds.y0,
            y1: bounds.y1,
        })
        .collect())
}
