//! TripTales Storage Layer
//!
//! Durable storage for itinerary records and their proof photos.
//!
//! # Architecture
//!
//! - One JSON document holds the ordered list of records (newest first)
//! - One directory holds proof photos named `<itinerary-id>.<ext>`
//! - Every mutation of the document goes through a FIFO [`WriteQueue`], so at
//!   most one read-modify-write is in flight and none can lose another's update
//! - Documents are replaced atomically (temp file + rename); readers never see
//!   a half-written file and do not take the queue
//!
//! The store assumes a single process owns the files.
//!
//! # Examples
//!
//! ```no_run
//! use triptales_store::{ItineraryStore, StoreConfig};
//!
//! # async fn demo() -> Result<(), triptales_store::StoreError> {
//! let store = ItineraryStore::open(&StoreConfig::default()).await?;
//! let page = store.list(&Default::default()).await?;
//! println!("{} itineraries", page.total);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod proofs;
mod queue;

pub use config::StoreConfig;
pub use document::{InsertOutcome, ItineraryStore};
pub use error::StoreError;
pub use proofs::{ProofStorage, StoredProof};
pub use queue::WriteQueue;
