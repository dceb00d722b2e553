//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Default cap on stored records
pub const DEFAULT_MAX_ITEMS: usize = 500;

/// Where and how itineraries are persisted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the record document
    pub data_dir: PathBuf,

    /// File name of the record document inside `data_dir`
    pub document_name: String,

    /// Directory holding proof photos
    pub proof_dir: PathBuf,

    /// URL prefix under which `proof_dir` is served
    pub public_proof_prefix: String,

    /// Maximum records kept; the oldest are evicted beyond this
    pub max_items: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            document_name: "itineraries.json".to_string(),
            proof_dir: PathBuf::from("uploads/itinerary-proofs"),
            public_proof_prefix: "/uploads/itinerary-proofs".to_string(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl StoreConfig {
    /// Configuration rooted at `root` (document in `root/data`, photos in
    /// `root/uploads/itinerary-proofs`)
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let defaults = Self::default();
        Self {
            data_dir: root.join(&defaults.data_dir),
            proof_dir: root.join(&defaults.proof_dir),
            ..defaults
        }
    }

    /// Full path of the record document
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(&self.document_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_items == 0 {
            return Err("max_items must be greater than 0".to_string());
        }
        if self.document_name.trim().is_empty() {
            return Err("document_name must not be empty".to_string());
        }
        if !self.public_proof_prefix.starts_with('/')
            || self.public_proof_prefix.trim_end_matches('/').is_empty()
        {
            return Err("public_proof_prefix must be a path below '/', e.g. /uploads".to_string());
        }
        Ok(())
    }
}
