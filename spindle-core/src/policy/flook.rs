//! F-LOOK: LOOK over frozen batches.

use std::mem;

use super::look::take_next_in_sweep;
use super::{IoScheduler, ScanDirection};
use crate::request::PendingRequest;

/// Runs LOOK over an active batch while new arrivals collect in a separate
/// add batch. The batches swap only when the active one drains, so late
/// arrivals never disturb the sweep in progress.
#[derive(Debug, Default)]
pub struct FLookScheduler {
    active: Vec<PendingRequest>,
    add: Vec<PendingRequest>,
    direction: ScanDirection,
}

impl FLookScheduler {
    /// Creates an empty F-LOOK scheduler sweeping upward.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current sweep direction.
    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    /// Number of requests in the batch currently being swept.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of requests waiting for the next batch.
    pub fn queued_len(&self) -> usize {
        self.add.len()
    }
}

impl IoScheduler for FLookScheduler {
    fn add_request(&mut self, request: PendingRequest) {
        self.add.push(request);
    }

    fn next_request(&mut self, _current_time: u64, current_track: u32) -> Option<PendingRequest> {
        if self.active.is_empty() {
            if self.add.is_empty() {
                return None;
            }
            mem::swap(&mut self.active, &mut self.add);
            self.direction = ScanDirection::Up;
        }

        take_next_in_sweep(&mut self.active, &mut self.direction, current_track)
    }

    fn has_pending_requests(&self) -> bool {
        !self.active.is_empty() || !self.add.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::tests::handle;

    #[test]
    fn test_flook_late_arrivals_wait_for_next_batch() {
        let mut scheduler = FLookScheduler::new();
        scheduler.add_request(handle(0, 0, 60));
        scheduler.add_request(handle(1, 0, 80));

        assert_eq!(scheduler.next_request(0, 50).unwrap().id.index(), 0);
        assert_eq!(scheduler.active_len(), 1);

        // Closer than 80, but arrives mid-sweep
        scheduler.add_request(handle(2, 1, 65));
        assert_eq!(scheduler.queued_len(), 1);

        assert_eq!(scheduler.next_request(1, 60).unwrap().id.index(), 1);
        assert_eq!(scheduler.next_request(2, 80).unwrap().id.index(), 2);
        assert!(!scheduler.has_pending_requests());
    }

    #[test]
    fn test_flook_batch_swap_resets_direction() {
        let mut scheduler = FLookScheduler::new();
        scheduler.add_request(handle(0, 0, 10));

        assert_eq!(scheduler.next_request(0, 50).unwrap().id.index(), 0);
        assert_eq!(scheduler.direction(), ScanDirection::Down);

        scheduler.add_request(handle(1, 1, 5));
        scheduler.add_request(handle(2, 1, 30));

        // New batch sweeps up from 10 first, so 30 beats the nearer 5
        assert_eq!(scheduler.next_request(1, 10).unwrap().id.index(), 2);
        assert_eq!(scheduler.direction(), ScanDirection::Up);
        assert_eq!(scheduler.next_request(2, 30).unwrap().id.index(), 1);
        assert_eq!(scheduler.direction(), ScanDirection::Down);
    }

    #[test]
    fn test_flook_pending_covers_both_batches() {
        let mut scheduler = FLookScheduler::new();
        assert!(!scheduler.has_pending_requests());
        assert_eq!(scheduler.next_request(0, 0), None);

        scheduler.add_request(handle(0, 0, 10));
        assert!(scheduler.has_pending_requests());
        assert_eq!(scheduler.active_len(), 0);
        assert_eq!(scheduler.queued_len(), 1);
    }

    #[test]
    fn test_flook_identical_requests_swept_down_latest_first() {
        let mut scheduler = FLookScheduler::new();
        scheduler.add_request(handle(0, 0, 90));
        scheduler.add_request(handle(1, 3, 1));
        scheduler.add_request(handle(2, 3, 1));

        assert_eq!(scheduler.next_request(3, 50).unwrap().id.index(), 0);
        assert_eq!(scheduler.next_request(43, 90).unwrap().id.index(), 2);
        assert_eq!(scheduler.next_request(132, 1).unwrap().id.index(), 1);
    }
}
