//! Configuration file parsing for the server.
//!
//! Settings come from an optional TOML file, then environment variables
//! override selected keys. Every table is optional; missing keys take their
//! defaults.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use triptales_domain::{ProximityIndex, ReviewPolicy, RoutePoint};
use triptales_gatekeeper::ValidationConfig;
use triptales_janitor::JanitorConfig;
use triptales_llm::ChatConfig;
use triptales_store::StoreConfig;

/// Default cap on JSON request bodies (12 MiB)
pub const DEFAULT_JSON_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range or malformed
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Moderation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Allow moving decided itineraries to another status
    pub allow_re_review: bool,

    /// Require an `Authorization: Bearer ...` header on status updates
    pub require_bearer_token: bool,

    /// Characters kept from a moderator note
    pub max_note_chars: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            allow_re_review: true,
            require_bearer_token: false,
            max_note_chars: triptales_domain::review::MAX_REVIEW_NOTE_CHARS,
        }
    }
}

impl ReviewConfig {
    /// Transition policy derived from these settings
    pub fn policy(&self) -> ReviewPolicy {
        ReviewPolicy {
            allow_re_review: self.allow_re_review,
        }
    }
}

/// An extra reference place for proximity checks
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointConfig {
    /// Place name as it appears in route text
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Proximity verification settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Acceptance radius in kilometres
    pub radius_km: f64,

    /// Places added to the built-in gazetteer
    pub points: Vec<PointConfig>,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            radius_km: triptales_domain::proximity::DEFAULT_RADIUS_KM,
            points: Vec::new(),
        }
    }
}

impl ProximityConfig {
    /// Build the gazetteer index
    pub fn index(&self) -> ProximityIndex {
        ProximityIndex::jammu_kashmir()
            .with_points(
                self.points
                    .iter()
                    .map(|p| RoutePoint::new(p.name.as_str(), p.latitude, p.longitude)),
            )
            .with_radius_km(self.radius_km)
    }
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// Largest accepted JSON request body, in bytes
    pub json_body_limit_bytes: usize,

    /// Record document and proof directory
    pub store: StoreConfig,

    /// Submission field limits
    pub validation: ValidationConfig,

    /// Moderation settings
    pub review: ReviewConfig,

    /// Proximity verification settings
    pub proximity: ProximityConfig,

    /// Chat provider settings
    pub chat: ChatConfig,

    /// Orphaned photo sweep settings
    pub janitor: JanitorConfig,

    /// Browser key echoed by `/api/public-config`
    pub google_maps_api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            json_body_limit_bytes: DEFAULT_JSON_BODY_LIMIT,
            store: StoreConfig::default(),
            validation: ValidationConfig::default(),
            review: ReviewConfig::default(),
            proximity: ProximityConfig::default(),
            chat: ChatConfig::default(),
            janitor: JanitorConfig::default(),
            google_maps_api_key: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup
    ///
    /// Recognized keys: `PORT`, `GROQ_API_KEY` (falling back to
    /// `XAI_API_KEY`), `GROQ_MODEL`, `CHAT_TIMEOUT_MS`,
    /// `MAX_ITINERARY_IMAGE_BYTES`, `MAX_ITINERARY_ITEMS`,
    /// `GOOGLE_MAPS_API_KEY`. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(port) = get("PORT") {
            self.bind_port = parse_number("PORT", &port)?;
        }
        if let Some(key) = get("GROQ_API_KEY").or_else(|| get("XAI_API_KEY")) {
            self.chat.api_key = Some(key);
        }
        if let Some(model) = get("GROQ_MODEL") {
            self.chat.model = model;
        }
        if let Some(ms) = get("CHAT_TIMEOUT_MS") {
            self.chat.timeout_ms = Some(parse_number("CHAT_TIMEOUT_MS", &ms)?);
        }
        if let Some(bytes) = get("MAX_ITINERARY_IMAGE_BYTES") {
            self.validation.max_image_bytes = parse_number("MAX_ITINERARY_IMAGE_BYTES", &bytes)?;
        }
        if let Some(items) = get("MAX_ITINERARY_ITEMS") {
            self.store.max_items = parse_number("MAX_ITINERARY_ITEMS", &items)?;
        }
        if let Some(key) = get("GOOGLE_MAPS_API_KEY") {
            self.google_maps_api_key = Some(key);
        }
        Ok(())
    }

    /// Check every section for out-of-range values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_port == 0 {
            return Err(ConfigError::Invalid("bind_port must be non-zero".to_string()));
        }
        if self.json_body_limit_bytes == 0 {
            return Err(ConfigError::Invalid(
                "json_body_limit_bytes must be greater than 0".to_string(),
            ));
        }
        if !self.proximity.radius_km.is_finite() || self.proximity.radius_km <= 0.0 {
            return Err(ConfigError::Invalid("proximity.radius_km must be positive".to_string()));
        }
        if self.review.max_note_chars == 0 {
            return Err(ConfigError::Invalid(
                "review.max_note_chars must be greater than 0".to_string(),
            ));
        }

        let sections = [
            ("store", self.store.validate()),
            ("validation", self.validation.validate()),
            ("chat", self.chat.validate()),
            ("janitor", self.janitor.validate()),
        ];
        for (name, result) in sections {
            result.map_err(|e| ConfigError::Invalid(format!("[{}] {}", name, e)))?;
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} must be a non-negative integer, got '{}'", key, value)))
}
