//! Metrics collection for Janitor operations

/// Outcome of one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Files found in the proof directory
    pub scanned: usize,

    /// Files referenced by a stored record
    pub referenced: usize,

    /// Orphans that were removed (or would be, in dry-run mode)
    pub removed: Vec<String>,

    /// Bytes freed by `removed`
    pub bytes_reclaimed: u64,

    /// Orphans kept because they are still inside the grace period
    pub within_grace: usize,

    /// Orphans that could not be removed
    pub failed: usize,

    /// Whether this was a dry run
    pub dry_run: bool,
}

impl SweepReport {
    /// One-line description for logs and the CLI
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "would remove" } else { "removed" };
        format!(
            "scanned {} proof files: {} referenced, {} {} ({} bytes), {} within grace period, {} failed",
            self.scanned,
            self.referenced,
            verb,
            self.removed.len(),
            self.bytes_reclaimed,
            self.within_grace,
            self.failed
        )
    }
}

/// Metrics accumulated over the janitor's lifetime
#[derive(Debug, Clone, Default)]
pub struct JanitorMetrics {
    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// Orphaned photos removed
    pub files_removed: usize,

    /// Bytes freed
    pub bytes_reclaimed: u64,

    /// Removal failures
    pub failures: usize,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sweep into the totals; dry runs only count as a sweep
    pub fn record_sweep(&mut self, report: &SweepReport) {
        self.sweep_count += 1;
        self.failures += report.failed;
        if !report.dry_run {
            self.files_removed += report.removed.len();
            self.bytes_reclaimed += report.bytes_reclaimed;
        }
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Janitor Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Orphans removed: {}", self.files_removed),
            format!("Bytes reclaimed: {}", self.bytes_reclaimed),
            format!("Failures: {}", self.failures),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(dry_run: bool) -> SweepReport {
        SweepReport {
            scanned: 3,
            referenced: 1,
            removed: vec!["a.jpg".to_string(), "b.png".to_string()],
            bytes_reclaimed: 2048,
            within_grace: 0,
            failed: 0,
            dry_run,
        }
    }

    #[test]
    fn test_record_sweep() {
        let mut metrics = JanitorMetrics::new();
        metrics.record_sweep(&report(false));
        metrics.record_sweep(&report(true));

        assert_eq!(metrics.sweep_count, 2);
        assert_eq!(metrics.files_removed, 2);
        assert_eq!(metrics.bytes_reclaimed, 2048);

        metrics.reset();
        assert_eq!(metrics.sweep_count, 0);
    }

    #[test]
    fn test_summary_wording() {
        assert!(report(true).summary().contains("would remove 2"));
        assert!(report(false).summary().contains("removed 2"));
        assert!(JanitorMetrics::new().summary().contains("Sweep cycles: 0"));
    }
}
