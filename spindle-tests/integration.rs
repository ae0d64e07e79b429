//! Spindle Integration Tests
//!
//! Exercises the full trace-file pipeline: load, simulate, render.

#[path = "integration/trace_pipeline.rs"]
mod trace_pipeline;

#[path = "integration/policy_scenarios.rs"]
mod policy_scenarios;
