//! # Runtime Configuration
//!
//! Defaults overridden from environment variables. Unparseable values are
//! logged and ignored.

use samply_market::MarketConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Default data file.
pub const DEFAULT_DATA_PATH: &str = "samply-data.json";

/// Default deadline sweep period.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// File backing the key-value store.
    pub data_path: PathBuf,
    /// How often overdue surveys are closed.
    pub sweep_interval: Duration,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Engine settings.
    pub market: MarketConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            log_filter: "info".to_string(),
            market: MarketConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Build a configuration from a variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SAMPLY_DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }

        if let Some(secs) = lookup("SAMPLY_SWEEP_INTERVAL_SECS") {
            match secs.parse::<u64>() {
                Ok(s) if s > 0 => config.sweep_interval = Duration::from_secs(s),
                _ => warn!("[samply] SAMPLY_SWEEP_INTERVAL_SECS must be a positive integer"),
            }
        }

        if let Some(grant) = lookup("SAMPLY_RESEARCHER_GRANT") {
            match grant.parse() {
                Ok(points) => {
                    config.market = config.market.with_researcher_starting_points(points)
                }
                Err(_) => warn!("[samply] SAMPLY_RESEARCHER_GRANT must be a whole number"),
            }
        }

        if let Some(filter) = lookup("RUST_LOG") {
            config.log_filter = filter;
        }

        config
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> RuntimeConfig {
    RuntimeConfig::from_lookup(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = RuntimeConfig::from_lookup(lookup_in(&[]));
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.market.researcher_starting_points, 100);
    }

    #[test]
    fn test_env_overrides() {
        let config = RuntimeConfig::from_lookup(lookup_in(&[
            ("SAMPLY_DATA_PATH", "/var/lib/samply/data.json"),
            ("SAMPLY_SWEEP_INTERVAL_SECS", "5"),
            ("SAMPLY_RESEARCHER_GRANT", "250"),
            ("RUST_LOG", "samply_market=debug"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/var/lib/samply/data.json"));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.market.researcher_starting_points, 250);
        assert_eq!(config.log_filter, "samply_market=debug");
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = RuntimeConfig::from_lookup(lookup_in(&[
            ("SAMPLY_SWEEP_INTERVAL_SECS", "0"),
            ("SAMPLY_RESEARCHER_GRANT", "lots"),
        ]));
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL);
        assert_eq!(config.market.researcher_starting_points, 100);
    }
}
