//! Configuration for Janitor operations

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Janitor service
///
/// # Examples
///
/// ```
/// use triptales_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.sweep_interval_minutes, 60);
/// assert_eq!(config.orphan_grace_minutes, 15);
/// assert!(!config.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorConfig {
    /// Run the background worker alongside the server
    pub enabled: bool,

    /// How often to run the sweep cycle (in minutes)
    pub sweep_interval_minutes: u64,

    /// Orphans younger than this are left alone (in minutes)
    pub orphan_grace_minutes: u64,

    /// Log what would be removed without removing it
    pub dry_run: bool,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_interval_minutes: 60,
            orphan_grace_minutes: 15,
            dry_run: false,
        }
    }
}

impl JanitorConfig {
    /// Get sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes * 60)
    }

    /// Get orphan grace period as Duration
    pub fn orphan_grace(&self) -> Duration {
        Duration::from_secs(self.orphan_grace_minutes * 60)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sweep_interval_minutes == 0 {
            return Err("sweep_interval_minutes must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_conversions() {
        let config = JanitorConfig::default();
        assert_eq!(config.sweep_interval(), Duration::from_secs(60 * 60));
        assert_eq!(config.orphan_grace(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: JanitorConfig = serde_json::from_str(r#"{"dry_run": true}"#).unwrap();
        assert!(config.dry_run);
        assert!(config.enabled);
        assert_eq!(config.sweep_interval_minutes, 60);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = JanitorConfig {
            sweep_interval_minutes: 0,
            ..JanitorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
