use facebrain_core::MonitorConfig;

/// Daemon configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON-lines frame source path, or `-` for stdin (default: `-`).
    pub frame_source: String,
    /// Threshold a tracked coefficient must exceed to update its slot.
    pub activation_threshold: f32,
    /// Threshold for expression cues such as tongue-out.
    pub cue_threshold: f32,
    /// Capacity of the engine request channel.
    pub channel_capacity: usize,
    /// Whether to scan for a brain-wave headset at startup.
    pub headset_enabled: bool,
}

impl Config {
    /// Load configuration from `FACEBRAIN_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = MonitorConfig::default();
        Self {
            frame_source: lookup("FACEBRAIN_FRAME_SOURCE").unwrap_or_else(|| "-".to_string()),
            activation_threshold: parse_or(
                lookup("FACEBRAIN_ACTIVATION_THRESHOLD"),
                defaults.activation_threshold,
            ),
            cue_threshold: parse_or(lookup("FACEBRAIN_CUE_THRESHOLD"), defaults.cue_threshold),
            channel_capacity: parse_or(lookup("FACEBRAIN_CHANNEL_CAPACITY"), 64usize).max(1),
            headset_enabled: lookup("FACEBRAIN_HEADSET_ENABLED")
                .map(|v| v != "0")
                .unwrap_or(true),
        }
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            activation_threshold: self.activation_threshold,
            cue_threshold: self.cue_threshold,
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.frame_source, "-");
        assert_eq!(config.activation_threshold, 0.25);
        assert_eq!(config.cue_threshold, 0.1);
        assert_eq!(config.channel_capacity, 64);
        assert!(config.headset_enabled);
        assert_eq!(config.monitor_config(), MonitorConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FACEBRAIN_FRAME_SOURCE", "/run/facebrain/frames"),
            ("FACEBRAIN_ACTIVATION_THRESHOLD", "0.4"),
            ("FACEBRAIN_CHANNEL_CAPACITY", "8"),
            ("FACEBRAIN_HEADSET_ENABLED", "0"),
        ]);
        assert_eq!(config.frame_source, "/run/facebrain/frames");
        assert_eq!(config.activation_threshold, 0.4);
        assert_eq!(config.channel_capacity, 8);
        assert!(!config.headset_enabled);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("FACEBRAIN_CUE_THRESHOLD", "high"),
            ("FACEBRAIN_CHANNEL_CAPACITY", "0"),
        ]);
        assert_eq!(config.cue_threshold, 0.1);
        assert_eq!(config.channel_capacity, 1);
    }
}
