//! Report rendering.

use std::fmt::Write;

use serde::Serialize;

use crate::report::SimulationReport;

/// Output format for simulation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per request followed by a `SUM:` line
    #[default]
    Text,
    /// Single JSON document including derived metrics
    Json,
}

/// Renders the classic per-request listing and summary line.
///
/// Each request prints as `index: arrival start end`, unset times as `-1`.
pub fn render_text(report: &SimulationReport) -> String {
    let mut out = String::new();

    for (index, request) in report.requests.iter().enumerate() {
        let start = request.start_time.map_or(-1, |t| t as i128);
        let end = request.end_time.map_or(-1, |t| t as i128);
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{index:5}: {:5} {start:5} {end:5}",
            request.arrival_time
        );
    }

    let _ = writeln!(
        out,
        "SUM: {} {} {:.4} {:.2} {:.2} {}",
        report.total_time,
        report.total_movement,
        report.io_utilization(),
        report.avg_turnaround().unwrap_or(0.0),
        report.avg_wait_time().unwrap_or(0.0),
        report.max_wait_time,
    );

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a SimulationReport,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    io_utilization: f64,
    avg_turnaround: Option<f64>,
    avg_wait_time: Option<f64>,
}

/// Renders the report and its derived metrics as pretty-printed JSON.
///
/// # Errors
///
/// - `SpindleError::Serialization` - The report could not be serialized
pub fn render_json(report: &SimulationReport) -> crate::Result<String> {
    let document = JsonReport {
        report,
        summary: JsonSummary {
            io_utilization: report.io_utilization(),
            avg_turnaround: report.avg_turnaround(),
            avg_wait_time: report.avg_wait_time(),
        },
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::policy::PolicyKind;
    use crate::request::IoRequest;

    fn fifo_report() -> SimulationReport {
        let requests = vec![IoRequest::new(0, 50), IoRequest::new(2, 30)];
        crate::simulate(requests, &SimulationConfig::with_policy(PolicyKind::Fifo))
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&fifo_report());

        let expected = "    0:     0     0    50\n    1:     2    50    70\nSUM: 70 70 1.0000 59.00 24.00 48\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_unset_times() {
        let report = SimulationReport {
            policy: PolicyKind::Fifo,
            initial_track: 0,
            requests: vec![IoRequest::new(3, 9)],
            dispatch_order: Vec::new(),
            total_time: 0,
            total_movement: 0,
            busy_time: 0,
            total_wait_time: 0,
            total_turnaround_time: 0,
            max_wait_time: 0,
        };

        let text = render_text(&report);
        assert!(text.starts_with("    0:     3    -1    -1\n"));
    }

    #[test]
    fn test_render_text_empty_run() {
        let report = crate::simulate(Vec::new(), &SimulationConfig::default());

        assert_eq!(render_text(&report), "SUM: 0 0 0.0000 0.00 0.00 0\n");
    }

    #[test]
    fn test_render_json_includes_summary() {
        let json = render_json(&fifo_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["policy"], "fifo");
        assert_eq!(value["total_time"], 70);
        assert_eq!(value["dispatch_order"], serde_json::json!([0, 1]));
        assert_eq!(value["requests"][1]["start_time"], 50);
        assert_eq!(value["summary"]["avg_wait_time"], 24.0);
        assert_eq!(value["summary"]["io_utilization"], 1.0);
    }
}
