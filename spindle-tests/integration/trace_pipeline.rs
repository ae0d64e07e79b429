//! Trace file to rendered report, for every policy.

use std::io::Write;

use spindle_core::{
    InputError, PolicyKind, SimulationConfig, SpindleError, load_requests, render_json,
    render_text,
};
use spindle_sim::{InvariantSuite, WorkloadConfig, WorkloadGenerator, render_trace};
use tempfile::NamedTempFile;

const SAMPLE_TRACE: &str = "\
#io generator
#numio=5 maxtracks=100 lambda=0.1
    0    50
    2    30
    2    80
    5    30
   60    10
";

fn write_trace(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run_trace(contents: &str, policy: PolicyKind) -> String {
    let file = write_trace(contents);
    let requests = load_requests(file.path()).unwrap();
    let report = spindle_core::simulate(requests, &SimulationConfig::with_policy(policy));
    assert!(InvariantSuite::standard().check_all(&report).is_empty());
    render_text(&report)
}

#[test]
fn test_fifo_sample_trace() {
    let expected = "\
    0:     0     0    50
    1:     2    50    70
    2:     2    70   120
    3:     5   120   170
    4:    60   170   190
SUM: 190 190 1.0000 106.20 68.20 115
";
    assert_eq!(run_trace(SAMPLE_TRACE, PolicyKind::Fifo), expected);
}

#[test]
fn test_sstf_sample_trace() {
    let expected = "\
    0:     0     0    50
    1:     2    50    70
    2:     2    90   160
    3:     5    70    70
    4:    60    70    90
SUM: 160 160 1.0000 74.20 42.20 88
";
    assert_eq!(run_trace(SAMPLE_TRACE, PolicyKind::Sstf), expected);
}

#[test]
fn test_look_sample_trace() {
    let expected = "\
    0:     0     0    50
    1:     2    80   130
    2:     2    50    80
    3:     5   130   130
    4:    60   130   150
SUM: 150 150 1.0000 94.20 64.20 125
";
    assert_eq!(run_trace(SAMPLE_TRACE, PolicyKind::Look), expected);
}

#[test]
fn test_clook_sample_trace() {
    let expected = "\
    0:     0     0    50
    1:     2   150   170
    2:     2    50    80
    3:     5   170   170
    4:    60    80   150
SUM: 170 170 1.0000 110.20 76.20 165
";
    assert_eq!(run_trace(SAMPLE_TRACE, PolicyKind::CLook), expected);
}

#[test]
fn test_flook_sample_trace() {
    // Request 4 arrives mid-batch and waits for the next batch
    let expected = "\
    0:     0     0    50
    1:     2    80   130
    2:     2    50    80
    3:     5   130   130
    4:    60   130   150
SUM: 150 150 1.0000 94.20 64.20 125
";
    assert_eq!(run_trace(SAMPLE_TRACE, PolicyKind::FLook), expected);
}

#[test]
fn test_idle_head_lowers_utilization() {
    let expected = "\
    0:     0     0    10
    1:   100   100   110
SUM: 110 20 0.1818 10.00 0.00 0
";
    assert_eq!(run_trace("0 10\n100 20\n", PolicyKind::Fifo), expected);
}

#[test]
fn test_json_report_from_trace() {
    let file = write_trace(SAMPLE_TRACE);
    let requests = load_requests(file.path()).unwrap();
    let config = SimulationConfig::with_policy(PolicyKind::CLook);
    let report = spindle_core::simulate(requests, &config);

    let value: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
    assert_eq!(value["policy"], "clook");
    assert_eq!(value["dispatch_order"], serde_json::json!([0, 2, 4, 1, 3]));
    assert_eq!(value["max_wait_time"], 165);
}

#[test]
fn test_malformed_trace_reports_line() {
    let file = write_trace("# header\n0 10\n3 oops\n");
    let error = load_requests(file.path()).unwrap_err();

    assert!(error.is_user_error());
    assert!(matches!(
        error,
        SpindleError::Input(InputError::InvalidNumber { line: 3, .. })
    ));
}

#[test]
fn test_generated_workload_round_trips_through_file() {
    let requests = WorkloadGenerator::new(WorkloadConfig {
        request_count: 250,
        seed: 2024,
        ..Default::default()
    })
    .generate();
    let file = write_trace(&render_trace(&requests));

    let loaded = load_requests(file.path()).unwrap();
    assert_eq!(loaded, requests);

    for policy in PolicyKind::ALL {
        let report = spindle_core::simulate(loaded.clone(), &SimulationConfig::with_policy(policy));
        let violations = InvariantSuite::standard().check_all(&report);
        assert!(violations.is_empty(), "{policy}: {violations:?}");
    }
}
