//! LOOK elevator scheduling.

use std::cmp::Ordering;

use super::{IoScheduler, ScanDirection};
use crate::request::PendingRequest;

/// Sweeps the head in one direction, serving the nearest request at or beyond
/// it, and reverses only when nothing is left on that side.
#[derive(Debug, Default)]
pub struct LookScheduler {
    pending: Vec<PendingRequest>,
    direction: ScanDirection,
}

impl LookScheduler {
    /// Creates an empty LOOK scheduler sweeping upward.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current sweep direction.
    pub fn direction(&self) -> ScanDirection {
        self.direction
    }
}

impl IoScheduler for LookScheduler {
    fn add_request(&mut self, request: PendingRequest) {
        self.pending.push(request);
    }

    fn next_request(&mut self, _current_time: u64, current_track: u32) -> Option<PendingRequest> {
        take_next_in_sweep(&mut self.pending, &mut self.direction, current_track)
    }

    fn has_pending_requests(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Removes and returns the next request of a LOOK sweep over `pending`.
///
/// Flips `direction` at most once. Returns `None` only when `pending` is empty.
pub(super) fn take_next_in_sweep(
    pending: &mut Vec<PendingRequest>,
    direction: &mut ScanDirection,
    current_track: u32,
) -> Option<PendingRequest> {
    for _ in 0..2 {
        if pending.is_empty() {
            return None;
        }

        sort_for_sweep(pending, *direction);
        let found = match direction {
            ScanDirection::Up => pending.iter().position(|r| r.track >= current_track),
            ScanDirection::Down => pending.iter().rposition(|r| r.track <= current_track),
        };

        if let Some(index) = found {
            return Some(pending.remove(index));
        }
        *direction = direction.reversed();
    }

    // Either side of the head is always non-empty for a non-empty set
    None
}

/// Orders by track ascending. Equal tracks are ordered by arrival ascending
/// when sweeping up and descending when sweeping down. Full ties keep their
/// insertion order, so the downward scan reaches the latest-added one first.
fn sort_for_sweep(pending: &mut [PendingRequest], direction: ScanDirection) {
    pending.sort_by(|a, b| {
        a.track.cmp(&b.track).then_with(|| {
            let by_arrival: Ordering = a.arrival_time.cmp(&b.arrival_time);
            match direction {
                ScanDirection::Up => by_arrival,
                ScanDirection::Down => by_arrival.reverse(),
            }
        })
    });
}
