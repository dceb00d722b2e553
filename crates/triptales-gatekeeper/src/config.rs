//! Gatekeeper configuration

use serde::Deserialize;

/// Default cap on decoded proof photo size (5 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Field limits applied to submissions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum title length (characters)
    pub title_max_chars: usize,

    /// Maximum route length (characters)
    pub route_max_chars: usize,

    /// Maximum duration length (characters)
    pub duration_max_chars: usize,

    /// Maximum budget length (characters)
    pub budget_max_chars: usize,

    /// Maximum highlights length (characters)
    pub highlights_max_chars: usize,

    /// Maximum decoded proof photo size (bytes)
    pub max_image_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 120,
            route_max_chars: 220,
            duration_max_chars: 60,
            budget_max_chars: 80,
            highlights_max_chars: 1800,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl ValidationConfig {
    /// Override the photo size cap
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Validate the configuration itself
    pub fn validate(&self) -> Result<(), String> {
        let limits = [
            ("title_max_chars", self.title_max_chars),
            ("route_max_chars", self.route_max_chars),
            ("duration_max_chars", self.duration_max_chars),
            ("budget_max_chars", self.budget_max_chars),
            ("highlights_max_chars", self.highlights_max_chars),
            ("max_image_bytes", self.max_image_bytes),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(format!("{} must be greater than 0", name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.title_max_chars, 120);
        assert_eq!(config.highlights_max_chars, 1800);
        assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ValidationConfig = toml::from_str("max_image_bytes = 1024").unwrap();
        assert_eq!(config.max_image_bytes, 1024);
        assert_eq!(config.route_max_chars, 220);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = ValidationConfig::default().with_max_image_bytes(0);
        assert!(config.validate().is_err());
    }
}
