//! Command implementations.
//!
//! Each command returns the text to print so callers and tests can decide
//! where it goes.

pub mod list;
pub mod review;
pub mod show;
pub mod sweep;

pub use self::list::execute_list;
pub use self::review::execute_review;
pub use self::show::execute_show;
pub use self::sweep::execute_sweep;

use crate::config::Config;
use crate::error::{CliError, Result};
use triptales_domain::ItineraryId;
use triptales_store::ItineraryStore;

/// Open the store named by the configuration.
pub(crate) async fn open_store(config: &Config) -> Result<ItineraryStore> {
    Ok(ItineraryStore::open(&config.store).await?)
}

/// Parse an itinerary id given on the command line.
pub(crate) fn parse_id(raw: &str) -> Result<ItineraryId> {
    ItineraryId::parse(raw.trim())
        .map_err(|e| CliError::InvalidInput(format!("'{}' is not an itinerary id: {}", raw, e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{Config, OutputFormat};
    use crate::output::Formatter;
    use chrono::Utc;
    use tempfile::TempDir;
    use triptales_domain::{GeoPoint, ImageMime, ItineraryDraft, ItineraryId, ItineraryRecord, ProofImage};
    use triptales_store::{ItineraryStore, ProofStorage, StoreConfig};

    pub fn config(dir: &TempDir) -> Config {
        Config {
            store: StoreConfig::rooted_at(dir.path()),
            ..Config::default()
        }
    }

    pub fn plain(format: OutputFormat) -> Formatter {
        Formatter::new(format, false)
    }

    /// Store a pending itinerary together with its photo
    pub async fn seed(config: &Config, title: &str) -> ItineraryRecord {
        let store = ItineraryStore::open(&config.store).await.unwrap();
        let proofs = ProofStorage::from_config(&config.store);
        let draft = ItineraryDraft {
            title: title.to_string(),
            route: "Pahalgam".to_string(),
            duration: "2 days".to_string(),
            budget: "8000".to_string(),
            highlights: "Betaab valley".to_string(),
            location: GeoPoint::new(34.0159, 75.3162),
            photo: ProofImage {
                mime: ImageMime::Png,
                bytes: vec![0x89, 0x50, 0x4E, 0x47],
            },
        };
        let id = ItineraryId::new();
        let url = proofs.save(id, &draft.photo).await.unwrap();
        let record = ItineraryRecord::from_draft(id, &draft, url, None, Utc::now());
        store.insert(record.clone()).await.unwrap();
        record
    }
}
