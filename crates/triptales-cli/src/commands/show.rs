//! Show command implementation.

use crate::cli::ShowArgs;
use crate::commands::{open_store, parse_id};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the show command.
pub async fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let id = parse_id(&args.id)?;
    let store = open_store(config).await?;

    let record = store
        .get(id)
        .await?
        .ok_or_else(|| CliError::NotFound(id.to_string()))?;

    formatter.format_record(&record)
}
