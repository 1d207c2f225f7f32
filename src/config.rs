use serde::Deserialize;
use std::fs;

use crate::recurrence::ExpansionLimits;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/event-recurrence/config.toml";

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_bind")]
    pub bind: String,
    pub log_level: Option<String>,
    #[serde(default)]
    pub recurrence: RecurrenceConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecurrenceConfig {
    /// Cap on occurrences per expansion request; 0 disables the cap.
    #[serde(default = "default_max_occurrences")]
    pub max_occurrences: usize,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_occurrences() -> usize {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: None,
            recurrence: RecurrenceConfig::default(),
        }
    }
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            max_occurrences: default_max_occurrences(),
        }
    }
}

impl RecurrenceConfig {
    pub fn limits(&self) -> ExpansionLimits {
        ExpansionLimits {
            max_occurrences: (self.max_occurrences > 0).then_some(self.max_occurrences),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        let cfg: Config = toml::from_str(s)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert_eq!(cfg.log_level, None);
        assert_eq!(
            cfg.recurrence.limits(),
            ExpansionLimits::with_max_occurrences(10_000)
        );
    }

    #[test]
    fn zero_disables_the_cap() {
        let cfg = Config::from_toml("[recurrence]\nmax_occurrences = 0\n").unwrap();
        assert_eq!(cfg.recurrence.limits(), ExpansionLimits::unbounded());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = Config::from_toml(
            r#"
bind = "127.0.0.1:9000"
log_level = "debug"

[recurrence]
max_occurrences = 250
"#,
        )
        .unwrap();
        assert_eq!(cfg.bind, "127.0.0.1:9000");
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(
            cfg.recurrence.limits(),
            ExpansionLimits::with_max_occurrences(250)
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::from_toml("tls_cert = \"/tmp/cert.pem\"").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(Config::load("/nonexistent/event-recurrence.toml").is_err());
    }
}
