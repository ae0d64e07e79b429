//! First-in, first-out scheduling.

use std::collections::VecDeque;

use super::IoScheduler;
use crate::request::PendingRequest;

/// Serves requests strictly in arrival order, ignoring seek distance.
#[derive(Debug, Default)]
pub struct FifoScheduler {
    queue: VecDeque<PendingRequest>,
}

impl FifoScheduler {
    /// Creates an empty FIFO scheduler.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IoScheduler for FifoScheduler {
    fn add_request(&mut self, request: PendingRequest) {
        self.queue.push_back(request);
    }

    fn next_request(&mut self, _current_time: u64, _current_track: u32) -> Option<PendingRequest> {
        self.queue.pop_front()
    }

    fn has_pending_requests(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::tests::{drain, handle};

    #[test]
    fn test_fifo_ignores_seek_distance() {
        let mut scheduler = FifoScheduler::new();
        scheduler.add_request(handle(0, 0, 50));
        scheduler.add_request(handle(1, 2, 30));
        scheduler.add_request(handle(2, 3, 0));

        assert_eq!(drain(&mut scheduler, 0), vec![0, 1, 2]);
    }

    #[test]
    fn test_fifo_pending_tracking() {
        let mut scheduler = FifoScheduler::new();
        assert!(!scheduler.has_pending_requests());

        scheduler.add_request(handle(0, 0, 10));
        assert!(scheduler.has_pending_requests());

        assert_eq!(scheduler.next_request(0, 0).map(|r| r.id.index()), Some(0));
        assert!(!scheduler.has_pending_requests());
        assert_eq!(scheduler.next_request(0, 0), None);
    }
}
