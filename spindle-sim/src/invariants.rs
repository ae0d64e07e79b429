//! Invariant checking framework for finished simulation reports.

use spindle_core::{RequestId, SimulationReport};

/// Violation of a simulation invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invariant '{invariant}' violated: {description}")]
pub struct InvariantViolation {
    /// Name of the violated invariant
    pub invariant: String,
    /// Detailed description of the violation
    pub description: String,
}

impl InvariantViolation {
    fn new(invariant: &dyn Invariant, description: String) -> Self {
        Self {
            invariant: invariant.name().to_string(),
            description,
        }
    }
}

/// Trait for checking simulation invariants.
pub trait Invariant: Send + Sync {
    /// Checks if invariant holds for a finished run.
    ///
    /// # Errors
    /// Returns `InvariantViolation` if the invariant condition is not met.
    fn check(&self, report: &SimulationReport) -> Result<(), InvariantViolation>;

    /// Returns name of this invariant.
    fn name(&self) -> &str;
}

/// Every request was serviced with `arrival <= start <= end`.
pub struct RequestTimingInvariant;

impl Invariant for RequestTimingInvariant {
    fn check(&self, report: &SimulationReport) -> Result<(), InvariantViolation> {
        for (index, request) in report.requests.iter().enumerate() {
            let (Some(start), Some(end)) = (request.start_time, request.end_time) else {
                return Err(InvariantViolation::new(
                    self,
                    format!("request {index} was never serviced"),
                ));
            };

            if !(request.arrival_time <= start && start <= end) {
                return Err(InvariantViolation::new(
                    self,
                    format!(
                        "request {index} has arrival {} start {start} end {end}",
                        request.arrival_time
                    ),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "RequestTiming"
    }
}

/// Each request entered service exactly once.
pub struct DispatchCompletenessInvariant;

impl Invariant for DispatchCompletenessInvariant {
    fn check(&self, report: &SimulationReport) -> Result<(), InvariantViolation> {
        let mut seen = vec![false; report.request_count()];

        for id in &report.dispatch_order {
            match seen.get_mut(id.index()) {
                Some(slot) if *slot => {
                    return Err(InvariantViolation::new(
                        self,
                        format!("request {id} dispatched twice"),
                    ));
                }
                Some(slot) => *slot = true,
                None => {
                    return Err(InvariantViolation::new(
                        self,
                        format!("unknown request {id} dispatched"),
                    ));
                }
            }
        }

        if let Some(missing) = seen.iter().position(|dispatched| !dispatched) {
            return Err(InvariantViolation::new(
                self,
                format!("request {missing} never dispatched"),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "DispatchCompleteness"
    }
}

/// Replaying the dispatch order from the initial track reproduces every
/// service length and the total head movement.
pub struct SeekAccountingInvariant;

impl Invariant for SeekAccountingInvariant {
    fn check(&self, report: &SimulationReport) -> Result<(), InvariantViolation> {
        let mut head = report.initial_track;
        let mut movement = 0u64;

        for &id in &report.dispatch_order {
            let Some(request) = report.requests.get(id.index()) else {
                continue;
            };
            let distance = u64::from(request.track.abs_diff(head));
            let service = request
                .end_time
                .zip(request.start_time)
                .map(|(end, start)| end.saturating_sub(start));

            if service != Some(distance) {
                return Err(InvariantViolation::new(
                    self,
                    format!(
                        "request {id} took {service:?} ticks to seek {distance} tracks from {head}"
                    ),
                ));
            }

            movement += distance;
            head = request.track;
        }

        if movement != report.total_movement {
            return Err(InvariantViolation::new(
                self,
                format!(
                    "replayed movement {movement} but report says {}",
                    report.total_movement
                ),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "SeekAccounting"
    }
}

/// The single head never serves two requests at once.
pub struct ExclusiveServiceInvariant;

impl Invariant for ExclusiveServiceInvariant {
    fn check(&self, report: &SimulationReport) -> Result<(), InvariantViolation> {
        let mut previous: Option<(RequestId, u64)> = None;

        for &id in &report.dispatch_order {
            let Some(request) = report.requests.get(id.index()) else {
                continue;
            };
            let (Some(start), Some(end)) = (request.start_time, request.end_time) else {
                continue;
            };

            if let Some((previous_id, previous_end)) = previous
                && start < previous_end
            {
                return Err(InvariantViolation::new(
                    self,
                    format!(
                        "request {id} started at {start} before request {previous_id} finished at {previous_end}"
                    ),
                ));
            }
            previous = Some((id, end));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "ExclusiveService"
    }
}

/// The head is busy for no longer than the run lasts.
pub struct UtilizationInvariant;

impl Invariant for UtilizationInvariant {
    fn check(&self, report: &SimulationReport) -> Result<(), InvariantViolation> {
        if report.busy_time > report.total_time {
            return Err(InvariantViolation::new(
                self,
                format!(
                    "busy time {} exceeds total time {}",
                    report.busy_time, report.total_time
                ),
            ));
        }

        let utilization = report.io_utilization();
        if !(0.0..=1.0).contains(&utilization) {
            return Err(InvariantViolation::new(
                self,
                format!("utilization {utilization} outside [0, 1]"),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Utilization"
    }
}

/// Accumulated totals agree with the per-request timings.
pub struct MetricsConsistencyInvariant;

impl Invariant for MetricsConsistencyInvariant {
    fn check(&self, report: &SimulationReport) -> Result<(), InvariantViolation> {
        let waits = report.requests.iter().filter_map(|r| r.wait_time());
        let total_wait: u64 = waits.clone().sum();
        let max_wait = waits.max().unwrap_or(0);
        let total_turnaround: u64 = report
            .requests
            .iter()
            .filter_map(|r| r.turnaround_time())
            .sum();
        let last_end = report
            .requests
            .iter()
            .filter_map(|r| r.end_time)
            .max()
            .unwrap_or(0);

        let checks = [
            ("total wait", total_wait, report.total_wait_time),
            ("max wait", max_wait, report.max_wait_time),
            (
                "total turnaround",
                total_turnaround,
                report.total_turnaround_time,
            ),
            ("total time", last_end, report.total_time),
            ("busy time", report.total_movement, report.busy_time),
        ];

        for (metric, expected, actual) in checks {
            if expected != actual {
                return Err(InvariantViolation::new(
                    self,
                    format!("{metric} is {actual}, per-request timings give {expected}"),
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MetricsConsistency"
    }
}

/// A set of invariants checked together.
#[derive(Default)]
pub struct InvariantSuite {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantSuite {
    /// Creates an empty suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the suite every policy is expected to pass.
    pub fn standard() -> Self {
        Self::new()
            .with(RequestTimingInvariant)
            .with(DispatchCompletenessInvariant)
            .with(SeekAccountingInvariant)
            .with(ExclusiveServiceInvariant)
            .with(UtilizationInvariant)
            .with(MetricsConsistencyInvariant)
    }

    /// Adds an invariant to the suite.
    pub fn with(mut self, invariant: impl Invariant + 'static) -> Self {
        self.invariants.push(Box::new(invariant));
        self
    }

    /// Returns the number of invariants in the suite.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Returns true if the suite checks nothing.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }

    /// Checks every invariant and collects all violations.
    pub fn check_all(&self, report: &SimulationReport) -> Vec<InvariantViolation> {
        let violations: Vec<_> = self
            .invariants
            .iter()
            .filter_map(|invariant| invariant.check(report).err())
            .collect();

        for violation in &violations {
            tracing::warn!("{violation}");
        }
        violations
    }
}
