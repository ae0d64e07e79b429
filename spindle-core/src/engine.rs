//! Tick-driven disk-head simulation engine.
//!
//! Each tick runs three phases in a fixed order: inject arrivals, complete the
//! in-service request, dispatch the next one. Arrivals and the head position
//! left by a completion are therefore both visible to the dispatch decision
//! made in the same tick.

use crate::config::SimulationConfig;
use crate::policy::{IoScheduler, PolicyKind};
use crate::report::SimulationReport;
use crate::request::{IoRequest, PendingRequest, RequestId};

/// Running accumulators for a simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceMetrics {
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

impl ServiceMetrics {
    /// Records a seek of `distance` tracks.
    pub fn record_seek(&mut self, distance: u64) {
        self.busy_time += distance;
        self.total_movement += distance;
    }

    /// Records a finished request.
    pub fn record_completion(&mut self, wait_time: u64, turnaround_time: u64) {
        self.total_wait_time += wait_time;
        self.total_turnaround_time += turnaround_time;
        self.max_wait_time = self.max_wait_time.max(wait_time);
    }
}

/// Single-head disk simulation over an owned request arena.
///
/// Requests are expected in ascending arrival order. A request whose arrival
/// time is already behind the clock is injected on the current tick.
pub struct DiskSimulation {
    requests: Vec<IoRequest>,
    scheduler: Box<dyn IoScheduler>,
    policy: PolicyKind,
    initial_track: u32,
    current_time: u64,
    current_track: u32,
    active: Option<RequestId>,
    next_arrival: usize,
    dispatch_order: Vec<RequestId>,
    metrics: ServiceMetrics,
    finished: bool,
}

impl DiskSimulation {
    /// Creates a simulation at tick 0 with the head on `config.initial_track`.
    ///
    /// `config.policy` only labels the report; `scheduler` makes every decision.
    pub fn new(
        requests: Vec<IoRequest>,
        scheduler: Box<dyn IoScheduler>,
        config: &SimulationConfig,
    ) -> Self {
        let dispatch_order = Vec::with_capacity(requests.len());
        Self {
            requests,
            scheduler,
            policy: config.policy,
            initial_track: config.initial_track,
            current_time: 0,
            current_track: config.initial_track,
            active: None,
            next_arrival: 0,
            dispatch_order,
            metrics: ServiceMetrics::default(),
            finished: false,
        }
    }

    /// Returns the current simulation tick.
    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    /// Returns the head position as of the last completion.
    pub fn current_track(&self) -> u32 {
        self.current_track
    }

    /// Returns the request currently in service, if any.
    pub fn active_request(&self) -> Option<RequestId> {
        self.active
    }

    /// Returns the request arena in input order.
    pub fn requests(&self) -> &[IoRequest] {
        &self.requests
    }

    /// Returns the accumulators gathered so far.
    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    /// Returns true once the termination condition has been met.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Processes the current tick and advances the clock unless the run is over.
    ///
    /// Returns true when the simulation has terminated; the clock then stays
    /// on the final tick and further calls do nothing.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return true;
        }

        self.inject_arrivals();
        self.complete_active();
        self.dispatch();

        if self.is_quiescent() {
            self.finished = true;
            tracing::debug!(tick = self.current_time, "Simulation quiescent");
            return true;
        }

        self.current_time += 1;
        false
    }

    /// Runs the simulation to termination and produces the report.
    pub fn run(mut self) -> SimulationReport {
        tracing::debug!(
            policy = %self.policy,
            requests = self.requests.len(),
            initial_track = self.initial_track,
            "Starting simulation"
        );

        while !self.step() {}

        let report = self.into_report();
        tracing::info!("{}", report.summary());
        report
    }

    fn inject_arrivals(&mut self) {
        while let Some(request) = self.requests.get(self.next_arrival) {
            if request.arrival_time > self.current_time {
                break;
            }

            let id = RequestId::new(self.next_arrival);
            tracing::trace!(
                tick = self.current_time,
                %id,
                track = request.track,
                "Request arrived"
            );
            self.scheduler.add_request(PendingRequest::from_request(id, request));
            self.next_arrival += 1;
        }
    }

    fn complete_active(&mut self) {
        let Some(id) = self.active else {
            return;
        };

        if self.requests[id.index()].end_time == Some(self.current_time) {
            self.finish_active(id);
        }
    }

    /// Starts pending requests until one needs the head to move.
    ///
    /// A zero-seek request completes on the spot, so the loop tries again
    /// within the same tick.
    fn dispatch(&mut self) {
        while self.active.is_none() && self.scheduler.has_pending_requests() {
            let Some(next) = self
                .scheduler
                .next_request(self.current_time, self.current_track)
            else {
                break;
            };

            let distance = next.distance_from(self.current_track);
            let request = &mut self.requests[next.id.index()];
            request.start_time = Some(self.current_time);
            request.end_time = Some(self.current_time + distance);

            self.metrics.record_seek(distance);
            self.dispatch_order.push(next.id);
            self.active = Some(next.id);

            tracing::debug!(
                tick = self.current_time,
                id = %next.id,
                from = self.current_track,
                to = next.track,
                distance,
                "Dispatched request"
            );

            if distance == 0 {
                self.finish_active(next.id);
            }
        }
    }

    fn finish_active(&mut self, id: RequestId) {
        let request = &self.requests[id.index()];
        let (Some(wait_time), Some(turnaround_time)) =
            (request.wait_time(), request.turnaround_time())
        else {
            tracing::error!(%id, "Finishing a request that never started");
            self.active = None;
            return;
        };

        self.metrics.record_completion(wait_time, turnaround_time);
        self.current_track = request.track;
        self.active = None;

        tracing::debug!(
            tick = self.current_time,
            %id,
            track = request.track,
            wait_time,
            turnaround_time,
            "Completed request"
        );
    }

    fn is_quiescent(&self) -> bool {
        self.active.is_none()
            && !self.scheduler.has_pending_requests()
            && self.next_arrival == self.requests.len()
    }

    fn into_report(self) -> SimulationReport {
        SimulationReport {
            policy: self.policy,
            initial_track: self.initial_track,
            requests: self.requests,
            dispatch_order: self.dispatch_order,
            total_time: self.current_time,
            total_movement: self.metrics.total_movement,
            busy_time: self.metrics.busy_time,
            total_wait_time: self.metrics.total_wait_time,
            total_turnaround_time: self.metrics.total_turnaround_time,
            max_wait_time: self.metrics.max_wait_time,
        }
    }
}
