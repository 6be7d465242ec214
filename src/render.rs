// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ties the pieces together: split the image, start one worker per
//! strip, and let the coordinator watch them until they are all done.

use crossbeam;
use crossbeam::channel;

use coordinator::Coordinator;
use errors::{RenderError, Result};
use fractal::Fractal;
use partition::split_columns;
use planes::Rect;
use raster::IndexedImage;
use worker::{render_region, CancelSignal};

/// Renders `fractal` over `bounds` using `threads` workers.
///
/// `report` receives the aggregate number of pixels rendered after
/// every coordinator round; the last value it sees is the pixel count
/// of the whole image.  Partitioning errors surface before any thread
/// is started.  A panicking worker or a cancelled render yields an
/// error, never a partial image.
pub fn render<F, R>(
    fractal: &F,
    bounds: Rect,
    threads: usize,
    report: R,
    cancel: &CancelSignal,
) -> Result<IndexedImage>
where
    F: Fractal,
    R: FnMut(usize),
{
    let strips = split_columns(bounds, threads)?;
    let mut image = IndexedImage::with_bounds(bounds)?;
    let total = image.len();
    info!(
        "rendering {}x{} pixels in {} strips",
        bounds.width(),
        bounds.height(),
        strips.len()
    );

    let outcome = {
        let regions = image.regions_mut(&strips)?;
        crossbeam::scope(|spawner| {
            let mut receivers = Vec::with_capacity(regions.len());
            for region in regions {
                debug!("starting worker on {:?}", region.bounds());
                let (tx, rx) = channel::bounded(0);
                receivers.push(rx);
                spawner.spawn(move |_| render_region(region, fractal, tx, cancel));
            }
            Coordinator::new(receivers).run(report)
        })
    };

    let rendered = outcome.map_err(|_| RenderError::WorkerPanicked)?;
    if rendered != total {
        return Err(RenderError::Cancelled { rendered, total });
    }
    info!("rendered {} pixels", rendered);
    Ok(image)
}
