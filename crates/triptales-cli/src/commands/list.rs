//! List command implementation.

use crate::cli::ListArgs;
use crate::commands::open_store;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use triptales_domain::query::MAX_LIST_LIMIT;
use triptales_domain::ItineraryQuery;

/// Execute the list command.
pub async fn execute_list(args: ListArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let mut query = ItineraryQuery {
        status: args.status.map(Into::into),
        ..ItineraryQuery::default()
    };

    if let Some(limit) = args.limit {
        if limit == 0 || limit > MAX_LIST_LIMIT {
            return Err(CliError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_LIST_LIMIT
            )));
        }
        query.limit = limit;
    }

    let store = open_store(config).await?;
    let page = store.list(&query).await?;

    formatter.format_page(&page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StatusArg;
    use crate::commands::test_support::{config, plain, seed};
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_json_newest_first() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        seed(&config, "First").await;
        seed(&config, "Second").await;

        let args = ListArgs { status: None, limit: Some(1) };
        let output = execute_list(args, &config, &plain(OutputFormat::Json)).await.unwrap();
        let page: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(page["total"], 2);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
        assert_eq!(page["items"][0]["title"], "Second");
    }

    #[tokio::test]
    async fn test_list_status_filter() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        seed(&config, "Pending one").await;

        let args = ListArgs {
            status: Some(StatusArg::Approved),
            limit: None,
        };
        let output = execute_list(args, &config, &plain(OutputFormat::Table)).await.unwrap();
        assert!(output.contains("No itineraries found"));
    }

    #[tokio::test]
    async fn test_list_rejects_bad_limit() {
        let dir = TempDir::new().unwrap();
        let args = ListArgs { status: None, limit: Some(0) };
        let result = execute_list(args, &config(&dir), &plain(OutputFormat::Table)).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
