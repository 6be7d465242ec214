// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Indexed-colour image storage.
//!
//! Pixels are kept column by column, so a vertical strip of the image
//! is a single contiguous run of the buffer.  That lets the buffer be
//! carved into disjoint `&mut` slices, one per worker, with nothing
//! but `split_at_mut`.

use std::mem;

use errors::{RenderError, Result};
use planes::{Pixel, Rect};

/// How many distinct colour indices a one-byte pixel can name.
pub const COLOR_INDICES: usize = 256;

/// A rendered (or rendering) image of colour indices.
#[derive(Clone, Debug)]
pub struct IndexedImage {
    bounds: Rect,
    pixels: Vec<u8>,
}

impl IndexedImage {
    /// A zeroed image anchored at 0,0.  Panics if `width * height`
    /// overflows; use `with_bounds` for sizes that come from outside.
    pub fn new(width: usize, height: usize) -> IndexedImage {
        let bounds = Rect::new(width, height);
        IndexedImage {
            bounds,
            pixels: vec![0 as u8; bounds.len()],
        }
    }

    /// A zeroed image covering `bounds`, which need not start at 0,0.
    pub fn with_bounds(bounds: Rect) -> Result<IndexedImage> {
        match bounds.checked_len() {
            Some(len) => Ok(IndexedImage {
                bounds,
                pixels: vec![0 as u8; len],
            }),
            None => Err(RenderError::InvalidParameter(format!(
                "image of {}x{} pixels is too large to address",
                bounds.width(),
                bounds.height()
            ))),
        }
    }

    /// The rectangle the image covers.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True for a zero-area image.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The colour index at `pixel`, if it is inside the image.
    pub fn get(&self, pixel: &Pixel) -> Option<u8> {
        if self.bounds.contains(pixel) {
            let b = self.bounds;
            Some(self.pixels[(pixel.0 - b.x0) * b.height() + (pixel.1 - b.y0)])
        } else {
            None
        }
    }

    /// The raw column-major buffer.
    pub fn as_columns(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterates over the colour indices in row-major order, the order
    /// encoders expect.
    pub fn rows<'a>(&'a self) -> impl Iterator<Item = u8> + 'a {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |y| (0..width).map(move |x| self.pixels[x * height + y]))
    }

    /// Hands out one exclusive `Region` per strip.  The strips must be
    /// full-height and must tile the image from left to right, which
    /// is exactly what `partition::split_columns` produces.
    pub fn regions_mut(&mut self, strips: &[Rect]) -> Result<Vec<Region>> {
        let bounds = self.bounds;
        let height = bounds.height();
        let mut rest: &mut [u8] = &mut self.pixels;
        let mut next = bounds.x0;
        let mut regions = Vec::with_capacity(strips.len());

        for strip in strips {
            if strip.x0 != next || strip.x1 <= strip.x0 || strip.y0 != bounds.y0 || strip.y1 != bounds.y1
            {
                return Err(RenderError::InvalidPartition {
                    width: bounds.width(),
                    parts: strips.len(),
                });
            }
            let taken = mem::replace(&mut rest, &mut []);
            if taken.len() < strip.len() {
                return Err(RenderError::InvalidPartition {
                    width: bounds.width(),
                    parts: strips.len(),
                });
            }
            let (head, tail) = taken.split_at_mut(strip.width() * height);
            rest = tail;
            next = strip.x1;
            regions.push(Region {
                bounds: *strip,
                pixels: head,
            });
        }

        if next != bounds.x1 {
            return Err(RenderError::InvalidPartition {
                width: bounds.width(),
                parts: strips.len(),
            });
        }
        Ok(regions)
    }
}

/// One strip of an `IndexedImage`, writable by exactly one worker.
#[derive(Debug)]
pub struct Region<'a> {
    bounds: Rect,
    pixels: &'a mut [u8],
}

impl<'a> Region<'a> {
    /// The rectangle this region may write.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of pixels in the region.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True for a zero-area region.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Stores a colour index.  Panics if the pixel lies outside the
    /// region; a worker writing outside its strip is a bug.
    pub fn set(&mut self, pixel: &Pixel, value: u8) {
        assert!(
            self.bounds.contains(pixel),
            "{:?} is outside region {:?}",
            pixel,
            self.bounds
        );
        let offset = (pixel.0 - self.bounds.x0) * self.bounds.height() + (pixel.1 - self.bounds.y0);
        self.pixels[offset] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partition::split_columns;

    #[test]
    fn regions_cover_the_buffer_once() {
        let mut img = IndexedImage::new(7, 3);
        let strips = split_columns(img.bounds(), 3).unwrap();
        {
            let regions = img.regions_mut(&strips).unwrap();
            let lens: Vec<usize> = regions.iter().map(|r| r.len()).collect();
            assert_eq!(lens, vec![6, 6, 9]);
            for (i, mut region) in regions.into_iter().enumerate() {
                let b = region.bounds();
                for x in b.x0..b.x1 {
                    for y in b.y0..b.y1 {
                        region.set(&Pixel(x, y), i as u8 + 1);
                    }
                }
            }
        }
        assert_eq!(img.get(&Pixel(0, 0)), Some(1));
        assert_eq!(img.get(&Pixel(3, 2)), Some(2));
        assert_eq!(img.get(&Pixel(6, 1)), Some(3));
        assert_eq!(img.get(&Pixel(7, 1)), None);
        assert!(img.as_columns().iter().all(|&p| p != 0));
    }

    #[test]
    fn rows_are_row_major() {
        let mut img = IndexedImage::new(2, 2);
        {
            let mut regions = img.regions_mut(&[Rect::new(2, 2)]).unwrap();
            let region = &mut regions[0];
            region.set(&Pixel(0, 0), 1);
            region.set(&Pixel(1, 0), 2);
            region.set(&Pixel(0, 1), 3);
            region.set(&Pixel(1, 1), 4);
        }
        assert_eq!(img.rows().collect::<Vec<u8>>(), vec![1, 2, 3, 4]);
        assert_eq!(img.as_columns(), &[1, 3, 2, 4]);
    }

    #[test]
    fn offset_image_is_indexed_from_its_corner() {
        let bounds = Rect {
            x0: 10,
            y0: 5,
            x1: 16,
            y1: 8,
        };
        let mut img = IndexedImage::with_bounds(bounds).unwrap();
        let strips = split_columns(bounds, 2).unwrap();
        {
            let mut regions = img.regions_mut(&strips).unwrap();
            regions[0].set(&Pixel(10, 5), 1);
            regions[1].set(&Pixel(15, 7), 2);
        }
        assert_eq!(img.len(), 18);
        assert_eq!(img.get(&Pixel(10, 5)), Some(1));
        assert_eq!(img.get(&Pixel(15, 7)), Some(2));
        assert_eq!(img.get(&Pixel(0, 0)), None);
        let rows: Vec<u8> = img.rows().collect();
        assert_eq!((rows[0], rows[17]), (1, 2));
    }

    #[test]
    fn unaddressable_image_is_refused() {
        let huge = ::std::usize::MAX / 2 + 1;
        assert!(IndexedImage::with_bounds(Rect::new(huge, 2)).is_err());
    }

    #[test]
    fn overlapping_strips_are_refused() {
        let mut img = IndexedImage::new(4, 2);
        let a = Rect {
            x0: 0,
            y0: 0,
            x1: 3,
            y1: 2,
        };
        let b = Rect {
            x0: 2,
            y0: 0,
            x1: 4,
            y1: 2,
        };
        assert!(img.regions_mut(&[a, b]).is_err());
    }

    #[test]
    fn partial_cover_is_refused() {
        let mut img = IndexedImage::new(4, 2);
        assert!(img.regions_mut(&[Rect::new(3, 2)]).is_err());
    }

    #[test]
    #[should_panic]
    fn writing_outside_a_region_panics() {
        let mut img = IndexedImage::new(4, 2);
        let strips = split_columns(img.bounds(), 2).unwrap();
        let mut regions = img.regions_mut(&strips).unwrap();
        regions[0].set(&Pixel(3, 0), 9);
    }
}
