//! Disk-head scheduling policies.
//!
//! Every policy holds a pending set of [`PendingRequest`] handles and decides
//! which one the head services next. The engine talks to a policy only through
//! the [`IoScheduler`] trait and picks the concrete variant once, up front, from
//! a [`PolicyKind`].

mod clook;
mod fifo;
mod flook;
mod look;
mod sstf;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use clook::CLookScheduler;
pub use fifo::FifoScheduler;
pub use flook::FLookScheduler;
pub use look::LookScheduler;
pub use sstf::SstfScheduler;

use crate::SpindleError;
use crate::request::PendingRequest;

/// Trait for disk-head scheduling strategies.
///
/// Defines the interface the simulation engine uses to hand arriving requests
/// to a policy and to ask it for the next request to service.
pub trait IoScheduler: Send {
    /// Adds a newly arrived request to the pending set.
    fn add_request(&mut self, request: PendingRequest);

    /// Selects the next request to service and removes it from the pending set.
    ///
    /// Returns `None` without side effects when nothing is pending.
    /// `current_time` is not used by any built-in policy.
    fn next_request(&mut self, current_time: u64, current_track: u32) -> Option<PendingRequest>;

    /// Returns true if any request is waiting to be dispatched.
    fn has_pending_requests(&self) -> bool;
}

/// Direction the head is sweeping in for LOOK-style policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanDirection {
    /// Toward higher track numbers
    #[default]
    Up,
    /// Toward lower track numbers
    Down,
}

impl ScanDirection {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            ScanDirection::Up => ScanDirection::Down,
            ScanDirection::Down => ScanDirection::Up,
        }
    }
}

/// Scheduling policy selector, keyed by the single-letter policy code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// `N`: first in, first out
    #[default]
    Fifo,
    /// `S`: shortest seek time first
    Sstf,
    /// `L`: LOOK elevator
    Look,
    /// `C`: circular LOOK
    CLook,
    /// `F`: two-queue batched LOOK
    FLook,
}

impl PolicyKind {
    /// Every policy, in code order N, S, L, C, F.
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fifo,
        PolicyKind::Sstf,
        PolicyKind::Look,
        PolicyKind::CLook,
        PolicyKind::FLook,
    ];

    /// Returns the single-letter code used on the command line.
    pub fn code(self) -> char {
        match self {
            PolicyKind::Fifo => 'N',
            PolicyKind::Sstf => 'S',
            PolicyKind::Look => 'L',
            PolicyKind::CLook => 'C',
            PolicyKind::FLook => 'F',
        }
    }

    /// Returns the human-readable policy name.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Sstf => "SSTF",
            PolicyKind::Look => "LOOK",
            PolicyKind::CLook => "CLOOK",
            PolicyKind::FLook => "FLOOK",
        }
    }

    /// Constructs a fresh, empty scheduler of this kind.
    pub fn build(self) -> Box<dyn IoScheduler> {
        match self {
            PolicyKind::Fifo => Box::new(FifoScheduler::new()),
            PolicyKind::Sstf => Box::new(SstfScheduler::new()),
            PolicyKind::Look => Box::new(LookScheduler::new()),
            PolicyKind::CLook => Box::new(CLookScheduler::new()),
            PolicyKind::FLook => Box::new(FLookScheduler::new()),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = SpindleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(PolicyKind::Fifo),
            "S" => Ok(PolicyKind::Sstf),
            "L" => Ok(PolicyKind::Look),
            "C" => Ok(PolicyKind::CLook),
            "F" => Ok(PolicyKind::FLook),
            _ => Err(SpindleError::UnknownPolicy {
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{IoRequest, RequestId};

    pub(crate) fn handle(index: usize, arrival_time: u64, track: u32) -> PendingRequest {
        PendingRequest::from_request(RequestId(index), &IoRequest::new(arrival_time, track))
    }

    /// Drains a scheduler with the head jumping to each served track.
    pub(crate) fn drain(scheduler: &mut dyn IoScheduler, mut track: u32) -> Vec<usize> {
        let mut served = Vec::new();
        while let Some(next) = scheduler.next_request(0, track) {
            served.push(next.id.index());
            track = next.track;
        }
        served
    }

    #[test]
    fn test_policy_code_round_trip() {
        for kind in PolicyKind::ALL {
            let parsed: PolicyKind = kind.code().to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_policy_code_rejected() {
        for code in ["", "X", "n", "NS", "FIFO"] {
            let error = code.parse::<PolicyKind>().unwrap_err();
            assert!(matches!(error, SpindleError::UnknownPolicy { .. }));
        }
    }

    #[test]
    fn test_default_policy_is_fifo() {
        assert_eq!(PolicyKind::default(), PolicyKind::Fifo);
        assert_eq!(PolicyKind::default().to_string(), "FIFO");
    }

    #[test]
    fn test_every_policy_starts_empty() {
        for kind in PolicyKind::ALL {
            let mut scheduler = kind.build();
            assert!(!scheduler.has_pending_requests(), "{kind} not empty");
            assert_eq!(scheduler.next_request(0, 0), None, "{kind} produced a request");
        }
    }

    #[test]
    fn test_every_policy_serves_each_request_once() {
        let tracks = [40, 10, 90, 10, 55, 0, 90, 70];
        for kind in PolicyKind::ALL {
            let mut scheduler = kind.build();
            for (index, track) in tracks.iter().enumerate() {
                scheduler.add_request(handle(index, index as u64, *track));
            }

            let mut served = drain(scheduler.as_mut(), 50);
            assert!(!scheduler.has_pending_requests());
            served.sort_unstable();
            assert_eq!(served, (0..tracks.len()).collect::<Vec<_>>(), "{kind}");
        }
    }

    #[test]
    fn test_direction_reversal() {
        assert_eq!(ScanDirection::default(), ScanDirection::Up);
        assert_eq!(ScanDirection::Up.reversed(), ScanDirection::Down);
        assert_eq!(ScanDirection::Down.reversed(), ScanDirection::Up);
    }
}
