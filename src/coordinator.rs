// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Watches the workers' progress channels and turns them into one
//! running total.
//!
//! Each worker sends its own cumulative pixel count, so a meaningful
//! total is only available by looking at every worker's latest count
//! at once.  The coordinator therefore works in rounds: one receive
//! attempt per open channel, then a sum over all workers.  A worker
//! with nothing new this round simply keeps its previous count; only a
//! closed channel marks it as finished.
//!
//! When a whole round turns up nothing the coordinator parks on a
//! `Select` over the open channels instead of spinning.

use crossbeam::channel::{Receiver, Select, TryRecvError};

/// What the coordinator knows about one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorkerStatus {
    /// Still sending; the count is the latest one received.
    Running(usize),
    /// Channel closed; the count is final.
    Finished(usize),
}

impl WorkerStatus {
    /// The latest cumulative count, final or not.
    pub fn count(&self) -> usize {
        match *self {
            WorkerStatus::Running(n) | WorkerStatus::Finished(n) => n,
        }
    }

    /// True once the worker's channel has closed.
    pub fn is_finished(&self) -> bool {
        match *self {
            WorkerStatus::Finished(_) => true,
            WorkerStatus::Running(_) => false,
        }
    }
}

impl Default for WorkerStatus {
    fn default() -> Self {
        WorkerStatus::Running(0)
    }
}

/// A single receive-or-closed poll.  An empty but open channel leaves
/// the status alone.
pub fn poll(receiver: &Receiver<usize>, status: WorkerStatus) -> WorkerStatus {
    match status {
        WorkerStatus::Finished(_) => status,
        WorkerStatus::Running(last) => match receiver.try_recv() {
            Ok(count) => WorkerStatus::Running(count),
            Err(TryRecvError::Empty) => status,
            Err(TryRecvError::Disconnected) => WorkerStatus::Finished(last),
        },
    }
}

/// Tracks one progress channel per worker.
pub struct Coordinator {
    receivers: Vec<Receiver<usize>>,
    statuses: Vec<WorkerStatus>,
}

impl Coordinator {
    /// Starts with every worker running at zero.
    pub fn new(receivers: Vec<Receiver<usize>>) -> Coordinator {
        let statuses = vec![WorkerStatus::default(); receivers.len()];
        Coordinator {
            receivers,
            statuses,
        }
    }

    /// Current view of every worker, in spawn order.
    pub fn statuses(&self) -> &[WorkerStatus] {
        &self.statuses
    }

    /// Sum of the latest counts across all workers, finished or not.
    pub fn aggregate(&self) -> usize {
        self.statuses.iter().map(|s| s.count()).sum()
    }

    /// True once every channel has closed.
    pub fn is_finished(&self) -> bool {
        self.statuses.iter().all(|s| s.is_finished())
    }

    /// One pass over every channel.  Returns whether anything changed.
    pub fn round(&mut self) -> bool {
        let mut changed = false;
        for (receiver, status) in self.receivers.iter().zip(self.statuses.iter_mut()) {
            let next = poll(receiver, *status);
            if next != *status {
                if next.is_finished() {
                    debug!("worker finished after {} pixels", next.count());
                }
                *status = next;
                changed = true;
            }
        }
        changed
    }

    // Blocks until at least one open channel has a value or has closed.
    fn wait(&self) {
        let mut select = Select::new();
        let mut open = 0;
        for (receiver, status) in self.receivers.iter().zip(self.statuses.iter()) {
            if !status.is_finished() {
                select.recv(receiver);
                open += 1;
            }
        }
        if open > 0 {
            select.ready();
        }
    }

    /// Runs rounds until every worker is done, handing the aggregate to
    /// `report` after each round.  Returns the final aggregate.
    pub fn run<R>(mut self, mut report: R) -> usize
    where
        R: FnMut(usize),
    {
        loop {
            let changed = self.round();
            report(self.aggregate());
            if self.is_finished() {
                return self.aggregate();
            }
            if !changed {
                self.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam;
    use crossbeam::channel;

    #[test]
    fn empty_open_channel_is_not_finished() {
        let (tx, rx) = channel::bounded::<usize>(0);
        let status = poll(&rx, WorkerStatus::Running(3));
        assert_eq!(status, WorkerStatus::Running(3));
        drop(tx);
        assert_eq!(poll(&rx, status), WorkerStatus::Finished(3));
    }

    #[test]
    fn finished_stays_finished() {
        let (_tx, rx) = channel::bounded::<usize>(1);
        assert_eq!(
            poll(&rx, WorkerStatus::Finished(9)),
            WorkerStatus::Finished(9)
        );
    }

    #[test]
    fn buffered_value_is_taken() {
        let (tx, rx) = channel::bounded(1);
        tx.send(5).unwrap();
        assert_eq!(poll(&rx, WorkerStatus::Running(4)), WorkerStatus::Running(5));
    }

    #[test]
    fn no_workers_is_immediately_finished() {
        let mut reports = vec![];
        let total = Coordinator::new(vec![]).run(|n| reports.push(n));
        assert_eq!(total, 0);
        assert_eq!(reports, vec![0]);
    }

    #[test]
    fn aggregate_is_monotonic_and_ends_at_total() {
        let sizes = vec![17, 250, 3, 90];
        let mut reports = vec![];
        let total = crossbeam::scope(|s| {
            let mut receivers = vec![];
            for &size in &sizes {
                let (tx, rx) = channel::bounded(0);
                receivers.push(rx);
                s.spawn(move |_| {
                    for n in 1..=size {
                        tx.send(n).unwrap();
                    }
                });
            }
            Coordinator::new(receivers).run(|n| reports.push(n))
        })
        .unwrap();

        assert_eq!(total, 360);
        assert_eq!(*reports.last().unwrap(), 360);
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn statuses_record_final_counts() {
        let mut receivers = vec![];
        for size in 1..4 {
            let (tx, rx) = channel::unbounded();
            for n in 1..=size {
                tx.send(n).unwrap();
            }
            receivers.push(rx);
        }
        let mut coordinator = Coordinator::new(receivers);
        while !coordinator.is_finished() {
            coordinator.round();
        }
        assert_eq!(
            coordinator.statuses(),
            &[
                WorkerStatus::Finished(1),
                WorkerStatus::Finished(2),
                WorkerStatus::Finished(3)
            ]
        );
        assert_eq!(coordinator.aggregate(), 6);
    }
}
