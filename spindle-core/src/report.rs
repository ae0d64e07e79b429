//! Results of a finished simulation run.

use serde::Serialize;

use crate::policy::PolicyKind;
use crate::request::{IoRequest, RequestId};

/// Result of a simulation run.
///
/// Holds the serviced requests in input order plus the raw accumulators;
/// averages and utilization are derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Policy that produced this run
    pub policy: PolicyKind,
    /// Track the head started on
    pub initial_track: u32,
    /// Requests with their service timing, in input order
    pub requests: Vec<IoRequest>,
    /// Request ids in the order they entered service
    pub dispatch_order: Vec<RequestId>,
    /// Tick at which the simulation terminated
    pub total_time: u64,
    /// Sum of all seek distances
    pub total_movement: u64,
    /// Ticks during which the head was moving
    pub busy_time: u64,
    /// Sum of per-request wait times
    pub total_wait_time: u64,
    /// Sum of per-request turnaround times
    pub total_turnaround_time: u64,
    /// Longest wait of any request
    pub max_wait_time: u64,
}

impl SimulationReport {
    /// Number of requests in the run.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Fraction of the run the head spent moving, in `[0, 1]`.
    ///
    /// A run that ends at tick 0 reports `0.0`.
    pub fn io_utilization(&self) -> f64 {
        if self.total_time == 0 {
            return 0.0;
        }
        self.busy_time as f64 / self.total_time as f64
    }

    /// Mean ticks from arrival to completion, or `None` for an empty run.
    pub fn avg_turnaround(&self) -> Option<f64> {
        self.mean(self.total_turnaround_time)
    }

    /// Mean ticks from arrival to service start, or `None` for an empty run.
    pub fn avg_wait_time(&self) -> Option<f64> {
        self.mean(self.total_wait_time)
    }

    fn mean(&self, total: u64) -> Option<f64> {
        match self.request_count() {
            0 => None,
            count => Some(total as f64 / count as f64),
        }
    }

    /// Generates human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} over {} requests: total_time={} movement={} utilization={:.4} avg_turnaround={:.2} avg_wait={:.2} max_wait={}",
            self.policy,
            self.request_count(),
            self.total_time,
            self.total_movement,
            self.io_utilization(),
            self.avg_turnaround().unwrap_or(0.0),
            self.avg_wait_time().unwrap_or(0.0),
            self.max_wait_time,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(request_count: usize, total_time: u64, busy_time: u64) -> SimulationReport {
        SimulationReport {
            policy: PolicyKind::Fifo,
            initial_track: 0,
            requests: vec![IoRequest::new(0, 0); request_count],
            dispatch_order: Vec::new(),
            total_time,
            total_movement: busy_time,
            busy_time,
            total_wait_time: 10,
            total_turnaround_time: 30,
            max_wait_time: 6,
        }
    }

    #[test]
    fn test_derived_metrics() {
        let report = report(4, 80, 60);

        assert_eq!(report.io_utilization(), 0.75);
        assert_eq!(report.avg_turnaround(), Some(7.5));
        assert_eq!(report.avg_wait_time(), Some(2.5));
    }

    #[test]
    fn test_empty_run_has_no_averages() {
        let report = report(0, 0, 0);

        assert_eq!(report.io_utilization(), 0.0);
        assert_eq!(report.avg_turnaround(), None);
        assert_eq!(report.avg_wait_time(), None);
    }

    #[test]
    fn test_summary_mentions_policy() {
        let summary = report(2, 10, 5).summary();

        assert!(summary.starts_with("FIFO over 2 requests"));
        assert!(summary.contains("utilization=0.5000"));
    }
}
