//! TripTales operator CLI library.
//!
//! Works directly against a local itinerary store: listing and inspecting
//! submissions, recording moderation decisions, and reclaiming orphaned
//! proof photos. The store's write queue only orders writes inside one
//! process, so `review` and `sweep` should not target a data directory that
//! a running server is writing to.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
