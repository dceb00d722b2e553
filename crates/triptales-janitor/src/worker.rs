//! Background worker for continuous Janitor operation

use crate::{Janitor, JanitorConfig, JanitorError};
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use triptales_store::{ItineraryStore, ProofStorage};

/// Background worker that runs the orphan sweep on a schedule
///
/// The first sweep runs immediately, then once per configured interval.
/// Failed sweeps are logged and retried at the next tick.
pub struct JanitorWorker {
    janitor: Janitor,
    interval: Duration,
}

impl JanitorWorker {
    /// Create a new background worker with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        let interval = config.sweep_interval();
        Self {
            janitor: Janitor::new(config),
            interval,
        }
    }

    /// Override the tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run until a shutdown signal (Ctrl+C) is received
    pub async fn run(
        &mut self,
        store: Arc<ItineraryStore>,
        proofs: ProofStorage,
    ) -> Result<(), JanitorError> {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("Janitor worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Starting sweep cycle");
                    if let Err(e) = self.janitor.sweep(&store, &proofs).await {
                        tracing::error!("Sweep failed: {}", e);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping janitor");
                    break;
                }
            }
        }

        tracing::info!("Janitor stopped. Final metrics:\n{}", self.janitor.metrics().summary());
        Ok(())
    }

    /// Run for a specific number of cycles, stopping at the first failure
    pub async fn run_cycles(
        &mut self,
        store: Arc<ItineraryStore>,
        proofs: ProofStorage,
        cycles: usize,
    ) -> Result<(), JanitorError> {
        let mut ticker = interval(self.interval);

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting sweep cycle {}/{}", cycle + 1, cycles);

            if let Err(e) = self.janitor.sweep(&store, &proofs).await {
                tracing::error!("Sweep {}/{} failed: {}", cycle + 1, cycles, e);
                return Err(e);
            }
        }

        tracing::info!(
            "Janitor finished {} cycles. Final metrics:\n{}",
            cycles,
            self.janitor.metrics().summary()
        );
        Ok(())
    }

    /// Get a reference to the janitor's current metrics
    pub fn metrics(&self) -> &crate::JanitorMetrics {
        self.janitor.metrics()
    }

    /// Reset the janitor's metrics counters
    pub fn reset_metrics(&mut self) {
        self.janitor.reset_metrics();
    }
}
