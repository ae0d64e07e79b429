//! Spindle Simulation Tooling - Workloads and invariant checking
//!
//! This crate generates reproducible request workloads, validates finished
//! simulation reports against the properties every scheduling policy must
//! uphold, and runs all policies side by side on the same workload.

pub mod invariants;
pub mod scenarios;
pub mod workload;

pub use invariants::{
    DispatchCompletenessInvariant, ExclusiveServiceInvariant, Invariant, InvariantSuite,
    InvariantViolation, MetricsConsistencyInvariant, RequestTimingInvariant,
    SeekAccountingInvariant, UtilizationInvariant,
};
pub use scenarios::{PolicyComparison, ScenarioRunner};
pub use workload::{WorkloadConfig, WorkloadGenerator, render_trace};
