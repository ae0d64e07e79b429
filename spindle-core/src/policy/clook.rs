//! Circular LOOK scheduling.

use super::IoScheduler;
use crate::request::PendingRequest;

/// Always sweeps upward; once nothing lies at or above the head it jumps back
/// to the lowest pending track and sweeps up again.
#[derive(Debug, Default)]
pub struct CLookScheduler {
    pending: Vec<PendingRequest>,
}

impl CLookScheduler {
    /// Creates an empty CLOOK scheduler.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IoScheduler for CLookScheduler {
    fn add_request(&mut self, request: PendingRequest) {
        self.pending.push(request);
    }

    fn next_request(&mut self, _current_time: u64, current_track: u32) -> Option<PendingRequest> {
        if self.pending.is_empty() {
            return None;
        }

        self.pending
            .sort_by_key(|request| (request.track, request.arrival_time, request.id));

        // Wrap to the lowest track when the upward sweep is exhausted
        let index = self
            .pending
            .iter()
            .position(|request| request.track >= current_track)
            .unwrap_or(0);

        Some(self.pending.remove(index))
    }

    fn has_pending_requests(&self) -> bool {
        !self.pending.is_empty()
    }
}
