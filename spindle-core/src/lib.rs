//! Spindle Core - Disk-head scheduling simulation
//!
//! This crate models a single moving disk head serving a timestamped stream of
//! I/O requests under a pluggable scheduling policy. It provides the request
//! model, the five scheduling policies, the tick-driven simulation engine, and
//! the thin input/output wrappers around them.

pub mod config;
pub mod engine;
pub mod input;
pub mod output;
pub mod policy;
pub mod report;
pub mod request;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{OutputConfig, SimulationConfig, SpindleConfig};
pub use engine::DiskSimulation;
pub use input::{InputError, load_requests, parse_requests};
pub use output::{OutputFormat, render_json, render_text};
pub use policy::{IoScheduler, PolicyKind, ScanDirection};
pub use report::SimulationReport;
pub use request::{IoRequest, PendingRequest, RequestId};

/// Errors that can bubble up from any Spindle subsystem.
///
/// The simulation engine itself never fails; these cover everything that
/// happens before a run (loading, selecting a policy) and after it (rendering).
#[derive(Debug, thiserror::Error)]
pub enum SpindleError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Unknown scheduling policy code: {code:?} (expected one of N, S, L, C, F)")]
    UnknownPolicy { code: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SpindleError {
    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SpindleError::Input(_) | SpindleError::UnknownPolicy { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SpindleError>;

/// Runs a complete simulation of `requests` under `config`.
///
/// Builds the configured policy once and drives the engine to termination.
pub fn simulate(requests: Vec<IoRequest>, config: &SimulationConfig) -> SimulationReport {
    let scheduler = config.policy.build();
    DiskSimulation::new(requests, scheduler, config).run()
}
