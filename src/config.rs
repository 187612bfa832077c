use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds and retry knobs for the guard.
///
/// Each threshold is a percentage ceiling; a metric measuring at or above its
/// ceiling marks the cluster unhealthy. A threshold `<= 0` disables that
/// metric entirely, so a config with every threshold disabled always passes
/// evaluation on the first poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// OS CPU usage ceiling in percent. `<= 0` disables the check.
    pub cpu_percent: f64,
    /// OS memory usage ceiling in percent. `<= 0` disables the check.
    pub mem_used_percent: f64,
    /// JVM heap usage ceiling in percent. `<= 0` disables the check.
    pub jvm_heap_used_percent: f64,
    /// Base delay for the exponential backoff between polls.
    pub retry_backoff: Duration,
    /// Number of backoff sleeps permitted before giving up.
    pub max_retries: u32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            cpu_percent: 90.0,
            mem_used_percent: 90.0,
            jvm_heap_used_percent: 90.0,
            retry_backoff: Duration::from_secs(1),
            max_retries: 3,
        }
    }
}

impl GuardConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OS CPU usage ceiling
    pub fn with_cpu_percent(mut self, percent: f64) -> Self {
        self.cpu_percent = percent;
        self
    }

    /// Set the OS memory usage ceiling
    pub fn with_mem_used_percent(mut self, percent: f64) -> Self {
        self.mem_used_percent = percent;
        self
    }

    /// Set the JVM heap usage ceiling
    pub fn with_jvm_heap_used_percent(mut self, percent: f64) -> Self {
        self.jvm_heap_used_percent = percent;
        self
    }

    /// Set the base backoff delay
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GuardConfig::default();
        assert_eq!(config.cpu_percent, 90.0);
        assert_eq!(config.mem_used_percent, 90.0);
        assert_eq!(config.jvm_heap_used_percent, 90.0);
        assert_eq!(config.retry_backoff, Duration::from_secs(1));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_config_builder() {
        let config = GuardConfig::new()
            .with_cpu_percent(80.0)
            .with_mem_used_percent(-1.0)
            .with_jvm_heap_used_percent(95.0)
            .with_retry_backoff(Duration::from_millis(250))
            .with_max_retries(5);
        assert_eq!(config.cpu_percent, 80.0);
        assert_eq!(config.mem_used_percent, -1.0);
        assert_eq!(config.jvm_heap_used_percent, 95.0);
        assert_eq!(config.retry_backoff, Duration::from_millis(250));
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_config_partial_deserialization_applies_defaults() {
        let config: GuardConfig = serde_json::from_str(r#"{"cpu_percent": 75.0}"#).unwrap();
        assert_eq!(config.cpu_percent, 75.0);
        assert_eq!(config.mem_used_percent, 90.0);
        assert_eq!(config.jvm_heap_used_percent, 90.0);
        assert_eq!(config.retry_backoff, Duration::from_secs(1));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = GuardConfig::new()
            .with_cpu_percent(85.0)
            .with_max_retries(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: GuardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
