//! Shortest-seek-time-first scheduling.

use super::IoScheduler;
use crate::request::PendingRequest;

/// Serves the pending request closest to the head.
///
/// Ties on seek distance go to the earliest-inserted request.
#[derive(Debug, Default)]
pub struct SstfScheduler {
    pending: Vec<PendingRequest>,
}

impl SstfScheduler {
    /// Creates an empty SSTF scheduler.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IoScheduler for SstfScheduler {
    fn add_request(&mut self, request: PendingRequest) {
        self.pending.push(request);
    }

    fn next_request(&mut self, _current_time: u64, current_track: u32) -> Option<PendingRequest> {
        // min_by_key keeps the first of equal minima, which preserves insertion order on ties
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, request)| request.distance_from(current_track))?;

        Some(self.pending.remove(index))
    }

    fn has_pending_requests(&self) -> bool {
        !self.pending.is_empty()
    }
}
