//! Review command implementation.

use crate::cli::ReviewArgs;
use crate::commands::{open_store, parse_id};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::Utc;
use triptales_domain::ReviewDecision;
use triptales_store::StoreError;

/// Execute the review command.
pub async fn execute_review(args: ReviewArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let id = parse_id(&args.id)?;
    let decision = ReviewDecision::with_note_limit(
        args.status.into(),
        args.note.as_deref(),
        config.review.max_note_chars,
    );

    let store = open_store(config).await?;
    let record = store
        .update_review(id, decision, &config.review.policy(), Utc::now())
        .await
        .map_err(|e| match e {
            StoreError::NotFound(id) => CliError::NotFound(id.to_string()),
            StoreError::Transition(t) => CliError::InvalidInput(t.to_string()),
            other => other.into(),
        })?;

    match formatter.format() {
        OutputFormat::Table => Ok(formatter.review_recorded(&record)),
        _ => formatter.format_record(&record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StatusArg;
    use crate::commands::test_support::{config, plain, seed};
    use tempfile::TempDir;
    use triptales_domain::ReviewStatus;
    use triptales_store::ItineraryStore;

    fn args(id: &str, status: StatusArg, note: Option<&str>) -> ReviewArgs {
        ReviewArgs {
            id: id.to_string(),
            status,
            note: note.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_review_persists() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let record = seed(&config, "Trip").await;
        let id = record.id.to_string();

        let output = execute_review(
            args(&id, StatusArg::Approved, Some("  real photo ")),
            &config,
            &plain(OutputFormat::Table),
        )
        .await
        .unwrap();
        assert_eq!(output, format!("✓ Itinerary {} marked approved", id));

        let store = ItineraryStore::open(&config.store).await.unwrap();
        let stored = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(stored.review_status, ReviewStatus::Approved);
        assert_eq!(stored.review_note.as_deref(), Some("real photo"));
        assert!(stored.reviewed_at.is_some());
    }

    #[tokio::test]
    async fn test_review_json_output() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let record = seed(&config, "Trip").await;

        let output = execute_review(
            args(&record.id.to_string(), StatusArg::Rejected, None),
            &config,
            &plain(OutputFormat::Json),
        )
        .await
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["reviewStatus"], "rejected");
    }

    #[tokio::test]
    async fn test_review_respects_policy() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir);
        config.review.allow_re_review = false;
        let record = seed(&config, "Trip").await;
        let id = record.id.to_string();
        let formatter = plain(OutputFormat::Table);

        execute_review(args(&id, StatusArg::Approved, None), &config, &formatter)
            .await
            .unwrap();
        let result = execute_review(args(&id, StatusArg::Pending, None), &config, &formatter).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_review_unknown_id() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let id = triptales_domain::ItineraryId::new().to_string();

        let result = execute_review(args(&id, StatusArg::Approved, None), &config, &plain(OutputFormat::Table)).await;
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }
}
