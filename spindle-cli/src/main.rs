//! Spindle CLI - Disk-head scheduling simulator
//!
//! Reads a request trace, simulates it under the selected policy and prints
//! the per-request timing followed by the summary line.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use spindle_core::tracing_setup::{CliLogLevel, init_tracing};
use spindle_core::{
    OutputFormat, PolicyKind, SpindleConfig, load_requests, render_json, render_text,
};
use spindle_sim::InvariantSuite;

#[derive(Parser)]
#[command(name = "spindle")]
#[command(about = "Simulate disk-head scheduling policies over a request trace")]
#[command(version)]
struct Cli {
    /// Scheduling policy: N (FIFO), S (SSTF), L (LOOK), C (CLOOK), F (FLOOK)
    #[arg(short = 's', long = "scheduler", value_name = "CODE")]
    scheduler: Option<PolicyKind>,

    /// Track the head starts on
    #[arg(long)]
    initial_track: Option<u32>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Check the finished run against the standard invariants
    #[arg(long)]
    verify: bool,

    /// Console log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Write a full trace-level log to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Request trace: one `arrival_time track` pair per line
    input: PathBuf,
}

impl Cli {
    /// Applies command-line flags on top of environment configuration.
    fn apply_to(&self, config: &mut SpindleConfig) {
        if let Some(policy) = self.scheduler {
            config.simulation.policy = policy;
        }
        if let Some(track) = self.initial_track {
            config.simulation.initial_track = track;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.log_file.as_deref())
        .context("failed to initialize logging")?;

    let mut config = SpindleConfig::from_env();
    cli.apply_to(&mut config);

    let requests = load_requests(&cli.input)
        .with_context(|| format!("failed to load requests from {}", cli.input.display()))?;

    let report = spindle_core::simulate(requests, &config.simulation);

    match config.output.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    if cli.verify {
        let violations = InvariantSuite::standard().check_all(&report);
        if !violations.is_empty() {
            bail!("{} invariant violation(s) in {} run", violations.len(), report.policy);
        }
        tracing::info!("All invariants hold");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_attached_policy_code() {
        let cli = Cli::try_parse_from(["spindle", "-sL", "trace.txt"]).unwrap();

        assert_eq!(cli.scheduler, Some(PolicyKind::Look));
        assert_eq!(cli.input, PathBuf::from("trace.txt"));
    }

    #[test]
    fn test_policy_defaults_to_config() {
        let cli = Cli::try_parse_from(["spindle", "trace.txt"]).unwrap();
        let mut config = SpindleConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.simulation.policy, PolicyKind::Fifo);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_policy_code_rejected() {
        assert!(Cli::try_parse_from(["spindle", "-sX", "trace.txt"]).is_err());
        assert!(Cli::try_parse_from(["spindle", "-s"]).is_err());
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Cli::try_parse_from(["spindle", "-sF"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "spindle",
            "-sC",
            "--initial-track",
            "30",
            "--format",
            "json",
            "trace.txt",
        ])
        .unwrap();
        let mut config = SpindleConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.simulation.policy, PolicyKind::CLook);
        assert_eq!(config.simulation.initial_track, 30);
        assert_eq!(config.output.format, OutputFormat::Json);
    }
}
