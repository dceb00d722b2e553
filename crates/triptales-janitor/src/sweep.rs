//! Orphaned proof photo reconciliation

use crate::config::JanitorConfig;
use crate::error::JanitorError;
use crate::metrics::{JanitorMetrics, SweepReport};
use std::collections::HashSet;
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};
use triptales_store::{ItineraryStore, ProofStorage, StoredProof};

/// Removes proof photos that no stored itinerary references
#[derive(Debug, Clone)]
pub struct Janitor {
    config: JanitorConfig,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a janitor with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            config,
            metrics: JanitorMetrics::new(),
        }
    }

    /// Create a janitor with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Accumulated metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Reset accumulated metrics
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run one sweep now
    pub async fn sweep(
        &mut self,
        store: &ItineraryStore,
        proofs: &ProofStorage,
    ) -> Result<SweepReport, JanitorError> {
        self.sweep_at(store, proofs, SystemTime::now()).await
    }

    /// Run one sweep, judging file age against `now`
    pub async fn sweep_at(
        &mut self,
        store: &ItineraryStore,
        proofs: &ProofStorage,
        now: SystemTime,
    ) -> Result<SweepReport, JanitorError> {
        let grace = self.config.orphan_grace();
        let dry_run = self.config.dry_run;

        let report = store
            .with_lock(|| async move {
                let referenced: HashSet<String> = store
                    .load()
                    .await?
                    .iter()
                    .filter_map(|r| r.proof_file_name().map(str::to_string))
                    .collect();
                let files = proofs.list_files().await?;
                Ok::<_, JanitorError>(reconcile(proofs, files, &referenced, now, grace, dry_run).await)
            })
            .await?;

        self.metrics.record_sweep(&report);
        info!(dry_run, "Proof sweep finished: {}", report.summary());
        Ok(report)
    }
}

async fn reconcile(
    proofs: &ProofStorage,
    files: Vec<StoredProof>,
    referenced: &HashSet<String>,
    now: SystemTime,
    grace: Duration,
    dry_run: bool,
) -> SweepReport {
    let mut report = SweepReport {
        scanned: files.len(),
        dry_run,
        ..SweepReport::default()
    };

    for file in files {
        if referenced.contains(&file.name) {
            report.referenced += 1;
            continue;
        }

        // A file modified "in the future" (clock skew) counts as fresh
        let age = now.duration_since(file.modified).unwrap_or(Duration::ZERO);
        if age < grace {
            debug!(file = %file.name, "Orphan inside grace period, keeping");
            report.within_grace += 1;
            continue;
        }

        if dry_run {
            info!(file = %file.name, "Would remove orphaned proof");
        } else if let Err(e) = proofs.remove(&file.name).await {
            warn!(file = %file.name, error = %e, "Failed to remove orphaned proof");
            report.failed += 1;
            continue;
        }

        report.bytes_reclaimed += file.size_bytes;
        report.removed.push(file.name);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;
    use triptales_domain::{
        GeoPoint, ImageMime, ItineraryDraft, ItineraryId, ItineraryRecord, ProofImage,
    };
    use triptales_store::StoreConfig;

    const HOUR: Duration = Duration::from_secs(3600);

    struct Fixture {
        _dir: TempDir,
        store: ItineraryStore,
        proofs: ProofStorage,
    }

    async fn fixture(max_items: usize) -> Fixture {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig {
            max_items,
            ..StoreConfig::rooted_at(dir.path())
        };
        Fixture {
            store: ItineraryStore::open(&config).await.unwrap(),
            proofs: ProofStorage::from_config(&config),
            _dir: dir,
        }
    }

    fn draft() -> ItineraryDraft {
        ItineraryDraft {
            title: "Pahalgam".to_string(),
            route: "Pahalgam".to_string(),
            duration: "1 day".to_string(),
            budget: "5000".to_string(),
            highlights: "Betaab valley".to_string(),
            location: GeoPoint::new(34.0159, 75.3162),
            photo: ProofImage {
                mime: ImageMime::Jpeg,
                bytes: vec![0xFF; 10],
            },
        }
    }

    /// Store a photo and, when `append` is set, a record pointing at it
    async fn submit(f: &Fixture, append: bool) -> String {
        let draft = draft();
        let id = ItineraryId::new();
        let url = f.proofs.save(id, &draft.photo).await.unwrap();
        if append {
            let record = ItineraryRecord::from_draft(id, &draft, url.clone(), None, Utc::now());
            f.store.insert(record).await.unwrap();
        }
        ProofStorage::file_name(id, &draft.photo)
    }

    #[tokio::test]
    async fn test_removes_only_old_orphans() {
        let f = fixture(500).await;
        let kept = submit(&f, true).await;
        let orphan = submit(&f, false).await;

        let mut janitor = Janitor::default_config();
        let report = janitor
            .sweep_at(&f.store, &f.proofs, SystemTime::now() + HOUR)
            .await
            .unwrap();

        assert_eq!(report.scanned, 2);
        assert_eq!(report.referenced, 1);
        assert_eq!(report.removed, vec![orphan]);
        assert_eq!(report.bytes_reclaimed, 10);

        let remaining: Vec<String> = f.proofs.list_files().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(remaining, vec![kept]);
        assert_eq!(janitor.metrics().files_removed, 1);
    }

    #[tokio::test]
    async fn test_fresh_orphans_are_kept() {
        let f = fixture(500).await;
        submit(&f, false).await;

        let mut janitor = Janitor::default_config();
        let report = janitor.sweep(&f.store, &f.proofs).await.unwrap();

        assert!(report.removed.is_empty());
        assert_eq!(report.within_grace, 1);
        assert_eq!(f.proofs.list_files().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dry_run_keeps_files() {
        let f = fixture(500).await;
        submit(&f, false).await;

        let mut janitor = Janitor::new(JanitorConfig {
            dry_run: true,
            ..JanitorConfig::default()
        });
        let report = janitor
            .sweep_at(&f.store, &f.proofs, SystemTime::now() + HOUR)
            .await
            .unwrap();

        assert_eq!(report.removed.len(), 1);
        assert!(report.dry_run);
        assert_eq!(f.proofs.list_files().await.unwrap().len(), 1);
        assert_eq!(janitor.metrics().files_removed, 0);
    }

    #[tokio::test]
    async fn test_evicted_photos_become_orphans() {
        let f = fixture(1).await;
        let evicted = submit(&f, true).await;
        let current = submit(&f, true).await;

        let mut janitor = Janitor::default_config();
        let report = janitor
            .sweep_at(&f.store, &f.proofs, SystemTime::now() + HOUR)
            .await
            .unwrap();

        assert_eq!(report.removed, vec![evicted]);
        let remaining: Vec<String> = f.proofs.list_files().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(remaining, vec![current]);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let f = fixture(500).await;
        let mut janitor = Janitor::default_config();
        let report = janitor.sweep(&f.store, &f.proofs).await.unwrap();
        assert_eq!(report, SweepReport::default());
    }
}
