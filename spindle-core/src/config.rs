//! Centralized configuration for Spindle.
//!
//! All tunable parameters are defined here so the engine, the CLI and the
//! simulation tooling agree on defaults.

use crate::output::OutputFormat;
use crate::policy::PolicyKind;

/// Central configuration for all Spindle components.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct SpindleConfig {
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

/// Simulation engine configuration.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    /// Track the head rests on at tick 0
    pub initial_track: u32,
    /// Scheduling policy used for the run
    pub policy: PolicyKind,
}

impl SimulationConfig {
    /// Creates a configuration for the given policy with the head at track 0.
    pub fn with_policy(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }
}

/// Report rendering configuration.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl SpindleConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparsable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(track) = lookup("SPINDLE_INITIAL_TRACK")
            && let Ok(track) = track.trim().parse::<u32>()
        {
            config.simulation.initial_track = track;
        }

        if let Some(code) = lookup("SPINDLE_POLICY") {
            match code.trim().parse::<PolicyKind>() {
                Ok(policy) => config.simulation.policy = policy,
                Err(error) => tracing::warn!("Ignoring SPINDLE_POLICY: {error}"),
            }
        }

        if let Some(format) = lookup("SPINDLE_OUTPUT_FORMAT") {
            match format.trim().to_lowercase().as_str() {
                "text" => config.output.format = OutputFormat::Text,
                "json" => config.output.format = OutputFormat::Json,
                other => tracing::warn!("Ignoring SPINDLE_OUTPUT_FORMAT: {other:?}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = SpindleConfig::default();

        assert_eq!(config.simulation.initial_track, 0);
        assert_eq!(config.simulation.policy, PolicyKind::Fifo);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_env_override() {
        let config = SpindleConfig::from_lookup(lookup_from(&[
            ("SPINDLE_INITIAL_TRACK", "25"),
            ("SPINDLE_POLICY", "C"),
            ("SPINDLE_OUTPUT_FORMAT", "JSON"),
        ]));

        assert_eq!(config.simulation.initial_track, 25);
        assert_eq!(config.simulation.policy, PolicyKind::CLook);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_env_values_keep_defaults() {
        let config = SpindleConfig::from_lookup(lookup_from(&[
            ("SPINDLE_INITIAL_TRACK", "-3"),
            ("SPINDLE_POLICY", "Q"),
            ("SPINDLE_OUTPUT_FORMAT", "xml"),
        ]));

        assert_eq!(config.simulation.initial_track, 0);
        assert_eq!(config.simulation.policy, PolicyKind::Fifo);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_with_policy_preset() {
        let config = SimulationConfig::with_policy(PolicyKind::FLook);
        assert_eq!(config.policy, PolicyKind::FLook);
        assert_eq!(config.initial_track, 0);
    }
}
