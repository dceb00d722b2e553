//! Sweep command implementation.

use crate::cli::SweepArgs;
use crate::commands::open_store;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use triptales_janitor::Janitor;
use triptales_store::ProofStorage;

/// Execute the sweep command.
pub async fn execute_sweep(args: SweepArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let mut janitor_config = config.janitor.clone();
    janitor_config.dry_run |= args.dry_run;
    if let Some(minutes) = args.grace_minutes {
        janitor_config.orphan_grace_minutes = minutes;
    }
    janitor_config.validate().map_err(CliError::Config)?;

    let store = open_store(config).await?;
    let proofs = ProofStorage::from_config(&config.store);

    let mut janitor = Janitor::new(janitor_config);
    let report = janitor.sweep(&store, &proofs).await?;

    formatter.format_sweep(&report)
}
