//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use triptales_domain::ReviewStatus;

/// TripTales CLI - Moderate itinerary submissions in a local store.
#[derive(Debug, Parser)]
#[command(name = "triptales")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Server configuration file (TOML); its [store], [review] and [janitor] tables are used
    #[arg(short, long, global = true, env = "TRIPTALES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resolve the store's relative directories against this root
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List itineraries, newest first
    List(ListArgs),

    /// Show one itinerary in full
    Show(ShowArgs),

    /// Record a moderation decision (stop the server first: writes are not coordinated across processes)
    Review(ReviewArgs),

    /// Remove proof photos no itinerary references (stop the server first)
    Sweep(SweepArgs),
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only list itineraries in this status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Itinerary ID
    pub id: String,
}

/// Arguments for the review command.
#[derive(Debug, Parser)]
pub struct ReviewArgs {
    /// Itinerary ID
    pub id: String,

    /// New review status
    #[arg(value_enum)]
    pub status: StatusArg,

    /// Moderator note; omit to clear the existing note
    #[arg(short, long)]
    pub note: Option<String>,
}

/// Arguments for the sweep command.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Report what would be removed without removing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Override the orphan grace period (minutes)
    #[arg(long)]
    pub grace_minutes: Option<u64>,
}

/// Review status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    /// Awaiting moderation
    Pending,
    /// Accepted
    Approved,
    /// Declined
    Rejected,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<StatusArg> for ReviewStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => ReviewStatus::Pending,
            StatusArg::Approved => ReviewStatus::Approved,
            StatusArg::Rejected => ReviewStatus::Rejected,
        }
    }
}
