//! Side-by-side policy runs over a shared workload.

use anyhow::bail;
use spindle_core::{DiskSimulation, IoRequest, PolicyKind, SimulationConfig, SimulationReport};

use crate::invariants::InvariantSuite;

/// Headline metrics of one policy's run.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyComparison {
    pub policy: PolicyKind,
    pub total_time: u64,
    pub total_movement: u64,
    pub io_utilization: f64,
    pub avg_turnaround: f64,
    pub avg_wait_time: f64,
    pub max_wait_time: u64,
}

impl From<&SimulationReport> for PolicyComparison {
    fn from(report: &SimulationReport) -> Self {
        Self {
            policy: report.policy,
            total_time: report.total_time,
            total_movement: report.total_movement,
            io_utilization: report.io_utilization(),
            avg_turnaround: report.avg_turnaround().unwrap_or(0.0),
            avg_wait_time: report.avg_wait_time().unwrap_or(0.0),
            max_wait_time: report.max_wait_time,
        }
    }
}

/// Runs policies on one workload and holds each report to an invariant suite.
pub struct ScenarioRunner {
    requests: Vec<IoRequest>,
    initial_track: u32,
    suite: InvariantSuite,
}

impl ScenarioRunner {
    /// Creates a runner checking the standard invariant suite.
    pub fn new(requests: Vec<IoRequest>, initial_track: u32) -> Self {
        Self {
            requests,
            initial_track,
            suite: InvariantSuite::standard(),
        }
    }

    /// Replaces the invariant suite.
    pub fn with_suite(mut self, suite: InvariantSuite) -> Self {
        self.suite = suite;
        self
    }

    /// Runs a single policy and verifies its report.
    ///
    /// # Errors
    /// Returns an error listing every invariant the run violated.
    pub fn run_policy(&self, policy: PolicyKind) -> anyhow::Result<SimulationReport> {
        let config = SimulationConfig {
            initial_track: self.initial_track,
            policy,
        };
        let report = DiskSimulation::new(self.requests.clone(), policy.build(), &config).run();

        let violations = self.suite.check_all(&report);
        if !violations.is_empty() {
            let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
            bail!("{policy} violated {} invariant(s): {}", violations.len(), details.join("; "));
        }

        Ok(report)
    }

    /// Runs every policy in code order and summarizes each.
    ///
    /// # Errors
    /// Fails on the first policy whose report violates an invariant.
    pub fn compare_all(&self) -> anyhow::Result<Vec<PolicyComparison>> {
        PolicyKind::ALL
            .iter()
            .map(|&policy| {
                let report = self.run_policy(policy)?;
                tracing::info!("{}", report.summary());
                Ok(PolicyComparison::from(&report))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::{Invariant, InvariantViolation};
    use crate::workload::{WorkloadConfig, WorkloadGenerator};

    struct NeverHolds;

    impl Invariant for NeverHolds {
        fn check(&self, _report: &SimulationReport) -> Result<(), InvariantViolation> {
            Err(InvariantViolation {
                invariant: self.name().to_string(),
                description: "always fails".to_string(),
            })
        }

        fn name(&self) -> &str {
            "NeverHolds"
        }
    }

    #[test]
    fn test_compare_all_covers_every_policy() {
        let requests = WorkloadGenerator::new(WorkloadConfig::default()).generate();
        let comparisons = ScenarioRunner::new(requests, 0).compare_all().unwrap();

        let policies: Vec<_> = comparisons.iter().map(|c| c.policy).collect();
        assert_eq!(policies, PolicyKind::ALL.to_vec());
    }

    #[test]
    fn test_seek_aware_policies_move_less_than_fifo() {
        let requests = WorkloadGenerator::new(WorkloadConfig {
            request_count: 300,
            max_interarrival: 2,
            ..Default::default()
        })
        .generate();
        let runner = ScenarioRunner::new(requests, 0);

        let fifo = runner.run_policy(PolicyKind::Fifo).unwrap();
        let sstf = runner.run_policy(PolicyKind::Sstf).unwrap();
        let look = runner.run_policy(PolicyKind::Look).unwrap();

        assert!(sstf.total_movement < fifo.total_movement);
        assert!(look.total_movement < fifo.total_movement);
    }

    #[test]
    fn test_violations_fail_the_run() {
        let runner = ScenarioRunner::new(vec![IoRequest::new(0, 5)], 0)
            .with_suite(InvariantSuite::new().with(NeverHolds));

        let error = runner.run_policy(PolicyKind::Fifo).unwrap_err();
        assert!(error.to_string().contains("NeverHolds"));
    }
}
