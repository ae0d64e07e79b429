//! I/O request model shared by the engine and the scheduling policies.
//!
//! The engine owns every [`IoRequest`] in an arena indexed by [`RequestId`].
//! Policies only ever see [`PendingRequest`] handles, which carry the
//! immutable keys they sort on and the id needed to hand the request back.

use std::fmt;

use serde::Serialize;

/// Positional identity of a request in the original input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(pub usize);

impl RequestId {
    /// Creates RequestId from zero-based input position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying input position.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single disk request and its service timing.
///
/// `start_time` and `end_time` are set exactly once by the engine, when the
/// request enters and leaves service respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IoRequest {
    /// Tick at which the request becomes visible to the scheduler
    pub arrival_time: u64,
    /// Target track
    pub track: u32,
    /// Tick at which the head started moving toward the track
    pub start_time: Option<u64>,
    /// Tick at which the head reached the track
    pub end_time: Option<u64>,
}

impl IoRequest {
    /// Creates an unserviced request.
    pub fn new(arrival_time: u64, track: u32) -> Self {
        Self {
            arrival_time,
            track,
            start_time: None,
            end_time: None,
        }
    }

    /// Ticks spent pending before service started.
    pub fn wait_time(&self) -> Option<u64> {
        self.start_time.map(|start| start - self.arrival_time)
    }

    /// Ticks from arrival to completion.
    pub fn turnaround_time(&self) -> Option<u64> {
        self.end_time.map(|end| end - self.arrival_time)
    }

    /// Returns true once the request has finished service.
    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }
}

/// Non-owning handle to a request held by a scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub arrival_time: u64,
    pub track: u32,
}

impl PendingRequest {
    /// Builds the handle for the request stored at `id`.
    pub fn from_request(id: RequestId, request: &IoRequest) -> Self {
        Self {
            id,
            arrival_time: request.arrival_time,
            track: request.track,
        }
    }

    /// Seek distance from `current_track` to this request's track.
    pub fn distance_from(&self, current_track: u32) -> u64 {
        u64::from(self.track.abs_diff(current_track))
    }
}
