// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Renders a single strip and reports how far it has got.

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

use fractal::Fractal;
use planes::Pixel;
use raster::Region;

/// Held by whoever may want to stop a render.  Dropping it, or
/// calling `cancel`, closes the signal channel.
#[derive(Debug)]
pub struct CancelHandle(Sender<()>);

impl CancelHandle {
    /// Stops every worker watching the paired signal at its next pixel.
    pub fn cancel(self) {
        drop(self.0)
    }
}

/// Watched by workers between pixel writes.
#[derive(Clone, Debug)]
pub struct CancelSignal(Receiver<()>);

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> CancelSignal {
        CancelSignal(channel::never())
    }

    /// True once the paired handle is gone.  Nothing is ever sent on
    /// the channel; only its closure counts.
    pub fn is_cancelled(&self) -> bool {
        match self.0.try_recv() {
            Err(TryRecvError::Disconnected) => true,
            _ => false,
        }
    }
}

/// A fresh handle and the signal it controls.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = channel::bounded(0);
    (CancelHandle(tx), CancelSignal(rx))
}

/// Renders every pixel of `region`, column by column, and after each
/// write sends the number of pixels done so far.  Returns that same
/// number.  `progress` is dropped on the way out, and that is the only
/// completion signal the coordinator gets.
///
/// The worker gives up early if `cancel` fires or the coordinator
/// stops listening.
pub fn render_region<F>(
    mut region: Region,
    fractal: &F,
    progress: Sender<usize>,
    cancel: &CancelSignal,
) -> usize
where
    F: Fractal + ?Sized,
{
    let bounds = region.bounds();
    let mut rendered = 0;
    for (x, y) in iproduct!(bounds.x0..bounds.x1, bounds.y0..bounds.y1) {
        if cancel.is_cancelled() {
            debug!("strip {:?} cancelled after {} pixels", bounds, rendered);
            break;
        }
        let pixel = Pixel(x, y);
        region.set(&pixel, fractal.at(pixel));
        rendered += 1;
        if progress.send(rendered).is_err() {
            warn!("strip {:?} lost its coordinator", bounds);
            break;
        }
    }
    rendered
}
