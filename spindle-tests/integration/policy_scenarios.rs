//! Reference scenarios for each scheduling policy.

use spindle_core::{IoRequest, PolicyKind, RequestId, SimulationConfig, SimulationReport};
use spindle_sim::ScenarioRunner;

fn run(policy: PolicyKind, initial_track: u32, requests: &[(u64, u32)]) -> SimulationReport {
    let requests = requests
        .iter()
        .map(|&(arrival, track)| IoRequest::new(arrival, track))
        .collect();
    let config = SimulationConfig {
        initial_track,
        policy,
    };
    spindle_core::simulate(requests, &config)
}

fn order(report: &SimulationReport) -> Vec<usize> {
    report.dispatch_order.iter().map(|id| id.index()).collect()
}

#[test]
fn test_fifo_serves_in_arrival_order() {
    let report = run(PolicyKind::Fifo, 0, &[(0, 50), (2, 30)]);

    assert_eq!(order(&report), vec![0, 1]);
    assert_eq!(report.requests[0].start_time, Some(0));
    assert_eq!(report.requests[0].end_time, Some(50));
}

#[test]
fn test_sstf_serves_shorter_seek_first() {
    let report = run(PolicyKind::Sstf, 0, &[(0, 50), (0, 10)]);

    assert_eq!(report.dispatch_order[0], RequestId(1));
}

#[test]
fn test_look_reverses_after_upward_sweep() {
    let report = run(PolicyKind::Look, 50, &[(0, 10), (0, 90)]);

    assert_eq!(order(&report), vec![1, 0]);
    assert_eq!(report.total_movement, 40 + 80);
}

#[test]
fn test_clook_jumps_back_to_lowest() {
    let report = run(PolicyKind::CLook, 50, &[(0, 10), (0, 90), (0, 20)]);

    assert_eq!(order(&report), vec![1, 0, 2]);
    assert_eq!(report.total_movement, 40 + 80 + 10);
}

#[test]
fn test_flook_defers_arrivals_to_next_batch() {
    // Under LOOK the late request at 65 is picked up on the way to 90;
    // F-LOOK finishes the frozen batch first
    let requests = [(0, 60), (0, 90), (5, 65)];

    let look = run(PolicyKind::Look, 50, &requests);
    let flook = run(PolicyKind::FLook, 50, &requests);

    assert_eq!(order(&look), vec![0, 2, 1]);
    assert_eq!(order(&flook), vec![0, 1, 2]);
}

#[test]
fn test_every_policy_agrees_on_single_request() {
    let runner = ScenarioRunner::new(vec![IoRequest::new(4, 25)], 10);
    let comparisons = runner.compare_all().unwrap();

    for comparison in comparisons {
        assert_eq!(comparison.total_time, 19, "{}", comparison.policy);
        assert_eq!(comparison.total_movement, 15);
        assert_eq!(comparison.max_wait_time, 0);
        assert_eq!(comparison.avg_turnaround, 15.0);
    }
}
