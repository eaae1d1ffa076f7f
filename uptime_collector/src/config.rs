//! Configuration management for the uptime collector

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite database file
    pub db_path: PathBuf,

    /// Time between two connectivity checks
    pub check_interval: Duration,

    /// Page fetched to confirm the connection is really up
    pub check_url: String,

    /// Host dialed before fetching the page
    pub check_host: String,

    /// Port dialed on `check_host`
    pub check_port: u16,

    /// Escalating timeouts, one probe attempt per entry
    pub probe_timeouts: Vec<Duration>,

    /// Time between two cleanups of the instant feed
    pub cleanup_interval: Duration,

    /// Instant records older than this are deleted
    pub cleanup_threshold: Duration,

    /// Log every successful check
    pub log_up: bool,

    /// Log every failed check
    pub log_down: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("uptime.db"),
            check_interval: Duration::from_secs(30),
            check_url: "https://www.google.com".to_string(),
            check_host: "www.google.com".to_string(),
            check_port: 443,
            probe_timeouts: vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
            ],
            cleanup_interval: Duration::from_secs(24 * 60 * 60),
            cleanup_threshold: Duration::from_secs(48 * 60 * 60),
            log_up: false,
            log_down: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(db_path) = lookup("UPTIME_DB_PATH") {
            config.db_path = PathBuf::from(db_path);
        }

        if let Some(interval) = lookup("UPTIME_CHECK_INTERVAL_SECONDS") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.check_interval = Duration::from_secs(seconds);
            }
        }

        if let Some(check_url) = lookup("UPTIME_CHECK_URL") {
            config.check_url = check_url;
        }

        if let Some(check_host) = lookup("UPTIME_CHECK_HOST") {
            config.check_host = check_host;
        }

        if let Some(check_port) = lookup("UPTIME_CHECK_PORT") {
            if let Ok(port) = check_port.parse() {
                config.check_port = port;
            }
        }

        if let Some(timeouts) = lookup("UPTIME_PROBE_TIMEOUTS") {
            let parsed: Vec<Duration> = timeouts
                .split(',')
                .filter_map(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .collect();
            if !parsed.is_empty() {
                config.probe_timeouts = parsed;
            }
        }

        if let Some(interval) = lookup("CLEANUP_INTERVAL_SECONDS") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.cleanup_interval = Duration::from_secs(seconds);
            }
        }

        if let Some(threshold) = lookup("CLEANUP_THRESHOLD_HOURS") {
            if let Some(seconds) = threshold
                .parse::<u64>()
                .ok()
                .and_then(|hours| hours.checked_mul(60 * 60))
            {
                config.cleanup_threshold = Duration::from_secs(seconds);
            }
        }

        if let Some(log_up) = lookup("LOG_UP") {
            config.log_up = log_up.to_lowercase() == "true";
        }

        if let Some(log_down) = lookup("LOG_DOWN") {
            config.log_down = log_down.to_lowercase() == "true";
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.db_path.as_os_str().is_empty() {
            return Err("db_path cannot be empty".to_string());
        }

        if self.check_url.is_empty() {
            return Err("check_url cannot be empty".to_string());
        }

        if self.check_host.is_empty() {
            return Err("check_host cannot be empty".to_string());
        }

        if self.probe_timeouts.is_empty() {
            return Err("at least one probe timeout must be specified".to_string());
        }

        if self.check_interval.is_zero() {
            return Err("check_interval must be greater than 0".to_string());
        }

        if self.cleanup_interval.is_zero() {
            return Err("cleanup_interval must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.check_interval, Duration::from_secs(30));
        assert_eq!(config.cleanup_threshold, Duration::from_secs(48 * 3600));
        assert!(!config.log_up);
        assert!(config.log_down);
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("UPTIME_DB_PATH", "/tmp/checks.db"),
            ("UPTIME_CHECK_INTERVAL_SECONDS", "10"),
            ("UPTIME_PROBE_TIMEOUTS", "1, 3"),
            ("CLEANUP_THRESHOLD_HOURS", "24"),
            ("LOG_UP", "TRUE"),
            ("UPTIME_CHECK_PORT", "not-a-port"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/tmp/checks.db"));
        assert_eq!(config.check_interval, Duration::from_secs(10));
        assert_eq!(
            config.probe_timeouts,
            vec![Duration::from_secs(1), Duration::from_secs(3)]
        );
        assert_eq!(config.cleanup_threshold, Duration::from_secs(24 * 3600));
        assert!(config.log_up);
        assert_eq!(config.check_port, 443);
    }

    #[test]
    fn test_overflowing_threshold_is_ignored() {
        let huge = u64::MAX.to_string();
        let config = Config::from_lookup(|key| match key {
            "CLEANUP_THRESHOLD_HOURS" => Some(huge.clone()),
            _ => None,
        });

        assert_eq!(config.cleanup_threshold, Duration::from_secs(48 * 3600));
    }

    #[test]
    fn test_validation_rejects_empty_timeouts() {
        let config = Config {
            probe_timeouts: vec![],
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}
