//! TripTales Janitor
//!
//! Background maintenance for the proof photo directory.
//!
//! # Overview
//!
//! A photo is written before its record is appended, and records evicted at
//! capacity leave their photos behind. Either way the proof directory can
//! accumulate files no record points at. The janitor reconciles the two:
//!
//! - **Orphan detection**: every file in the proof directory that no stored
//!   record references is an orphan
//! - **Grace period**: orphans younger than `orphan_grace_minutes` are kept,
//!   since a submission may be between its photo write and its append
//! - **Dry run**: report what would be removed without touching the disk
//!
//! Each sweep runs inside the store's write turn, so no submission can append
//! a record between the reference scan and the deletions.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use triptales_janitor::{Janitor, JanitorConfig};
//! use triptales_store::{ItineraryStore, ProofStorage, StoreConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::default();
//! let store = ItineraryStore::open(&config).await?;
//! let proofs = ProofStorage::from_config(&config);
//!
//! let mut janitor = Janitor::new(JanitorConfig::default());
//! let report = janitor.sweep(&store, &proofs).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use std::sync::Arc;
//! use triptales_janitor::{JanitorConfig, JanitorWorker};
//! use triptales_store::{ItineraryStore, ProofStorage, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig::default();
//!     let store = Arc::new(ItineraryStore::open(&config).await?);
//!     let mut worker = JanitorWorker::new(JanitorConfig::default());
//!
//!     // Run until Ctrl+C
//!     worker.run(store, ProofStorage::from_config(&config)).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [janitor]
//! enabled = true
//! sweep_interval_minutes = 60
//! orphan_grace_minutes = 15
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod sweep;
mod worker;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use metrics::{JanitorMetrics, SweepReport};
pub use sweep::Janitor;
pub use worker::JanitorWorker;
