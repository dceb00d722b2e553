//! JSON document store for itinerary records

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::queue::WriteQueue;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use triptales_domain::{
    ItineraryId, ItineraryPage, ItineraryQuery, ItineraryRecord, ReviewDecision, ReviewPolicy,
};

/// Result of appending a record
#[derive(Debug, Clone, Default)]
pub struct InsertOutcome {
    /// Records dropped from the tail to stay within capacity
    pub evicted: Vec<ItineraryRecord>,
}

/// Itinerary records persisted as one JSON array, newest first
///
/// Reads go straight to disk and see the last committed document. Writes
/// re-read the document inside their [`WriteQueue`] turn, modify it, and
/// replace the file atomically.
#[derive(Debug)]
pub struct ItineraryStore {
    path: PathBuf,
    max_items: usize,
    queue: WriteQueue,
}

impl ItineraryStore {
    /// Open the store, creating the data directory and an empty document
    /// if they do not exist yet
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let store = Self {
            path: config.document_path(),
            max_items: config.max_items.max(1),
            queue: WriteQueue::new(),
        };

        if !tokio::fs::try_exists(&store.path).await? {
            tokio::fs::write(&store.path, "[]\n").await?;
            info!(path = %store.path.display(), "Initialized itinerary document");
        }

        Ok(store)
    }

    /// Location of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured capacity
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Run `task` in the store's write turn
    ///
    /// Other components that must not race with record writes (such as
    /// the orphan sweep) queue through here.
    pub async fn with_lock<F, Fut, T>(&self, task: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.queue.with_lock(task).await
    }

    /// Load every record, newest first
    ///
    /// A missing or blank document is an empty store. Anything that is not a
    /// JSON array of records is [`StoreError::Corrupted`].
    pub async fn load(&self) -> Result<Vec<ItineraryRecord>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupted(format!("invalid JSON: {}", e)))?;
        if !value.is_array() {
            return Err(StoreError::Corrupted(
                "document is not a list of itineraries".to_string(),
            ));
        }

        let records: Vec<ItineraryRecord> = serde_json::from_value(value)
            .map_err(|e| StoreError::Corrupted(format!("invalid itinerary record: {}", e)))?;
        debug!(count = records.len(), "Loaded itinerary document");
        Ok(records)
    }

    async fn save(&self, records: &[ItineraryRecord]) -> Result<(), StoreError> {
        let mut body = serde_json::to_string_pretty(records)?;
        body.push('\n');

        let tmp = temp_path(&self.path);
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(body.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(count = records.len(), "Saved itinerary document");
        Ok(())
    }

    /// Prepend a record, evicting the oldest beyond capacity
    pub async fn insert(&self, record: ItineraryRecord) -> Result<InsertOutcome, StoreError> {
        self.with_lock(|| async move {
            let mut records = self.load().await?;
            if records.iter().any(|r| r.id == record.id) {
                return Err(StoreError::Duplicate(record.id));
            }

            let id = record.id;
            records.insert(0, record);
            let evicted = if records.len() > self.max_items {
                records.split_off(self.max_items)
            } else {
                Vec::new()
            };

            self.save(&records).await?;

            if !evicted.is_empty() {
                info!(count = evicted.len(), "Evicted oldest itineraries at capacity");
            }
            debug!(%id, "Inserted itinerary");
            Ok(InsertOutcome { evicted })
        })
        .await
    }

    /// Apply a moderator decision to one record and persist it
    ///
    /// The record is looked up inside the write turn, so concurrent updates
    /// are applied one after another against fresh state.
    pub async fn update_review(
        &self,
        id: ItineraryId,
        decision: ReviewDecision,
        policy: &ReviewPolicy,
        now: DateTime<Utc>,
    ) -> Result<ItineraryRecord, StoreError> {
        self.with_lock(|| async move {
            let mut records = self.load().await?;
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(StoreError::NotFound(id))?;

            record.apply_review(decision, policy, now)?;
            let updated = record.clone();

            self.save(&records).await?;
            Ok(updated)
        })
        .await
    }

    /// List records matching `query`, newest first
    pub async fn list(&self, query: &ItineraryQuery) -> Result<ItineraryPage, StoreError> {
        let matching: Vec<ItineraryRecord> = self
            .load()
            .await?
            .into_iter()
            .filter(|r| query.matches(r))
            .collect();

        let total = matching.len();
        let items = matching.into_iter().take(query.limit).collect();
        Ok(ItineraryPage { total, items })
    }

    /// Fetch one record by id
    pub async fn get(&self, id: ItineraryId) -> Result<Option<ItineraryRecord>, StoreError> {
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.load().await?.len())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use triptales_domain::{GeoPoint, ImageMime, ItineraryDraft, ProofImage, ReviewStatus};

    fn record(title: &str) -> ItineraryRecord {
        let draft = ItineraryDraft {
            title: title.to_string(),
            route: "Srinagar-Gulmarg".to_string(),
            duration: "3 days".to_string(),
            budget: "15000".to_string(),
            highlights: "Snow".to_string(),
            location: GeoPoint::new(34.0837, 74.7973),
            photo: ProofImage {
                mime: ImageMime::Jpeg,
                bytes: vec![0xFF, 0xD8, 0xFF],
            },
        };
        let id = ItineraryId::new();
        ItineraryRecord::from_draft(id, &draft, format!("/uploads/itinerary-proofs/{}.jpg", id), None, Utc::now())
    }

    async fn open(dir: &TempDir, max_items: usize) -> ItineraryStore {
        let config = StoreConfig {
            max_items,
            ..StoreConfig::rooted_at(dir.path())
        };
        ItineraryStore::open(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, 10).await;

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "[]\n");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, 10).await;
        std::fs::write(store.path(), "  \n").unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_is_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, 10).await;

        store.insert(record("first")).await.unwrap();
        store.insert(record("second")).await.unwrap();

        let titles: Vec<String> = store.load().await.unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, 10).await;
        let rec = record("dup");

        store.insert(rec.clone()).await.unwrap();
        let err = store.insert(rec).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, 2).await;

        let oldest = record("a");
        let oldest_id = oldest.id;
        store.insert(oldest).await.unwrap();
        store.insert(record("b")).await.unwrap();
        let outcome = store.insert(record("c")).await.unwrap();

        assert_eq!(outcome.evicted.len(), 1);
        assert_eq!(outcome.evicted[0].id, oldest_id);

        let titles: Vec<String> = store.load().await.unwrap().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, 10).await;
        store.insert(record("x")).await.unwrap();

        assert!(!temp_path(store.path()).exists());
    }

    #[tokio::test]
    async fn test_update_review_missing() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir, 10).await;

        let err = store
            .update_review(
                ItineraryId::new(),
                ReviewDecision::new(ReviewStatus::Approved, None),
                &ReviewPolicy::default(),
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/data/itineraries.json")),
            PathBuf::from("/data/itineraries.json.tmp")
        );
    }
}
