//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use triptales_domain::{ItineraryPage, ItineraryRecord, ReviewStatus};
use triptales_janitor::SweepReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one listing page.
    pub fn format_page(&self, page: &ItineraryPage) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(page)?),
            OutputFormat::Table => Ok(self.format_page_table(page)),
            OutputFormat::Quiet => Ok(ids(&page.items)),
        }
    }

    /// Format a single itinerary.
    pub fn format_record(&self, record: &ItineraryRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
            OutputFormat::Quiet => Ok(record.id.to_string()),
        }
    }

    /// Format a sweep report.
    pub fn format_sweep(&self, report: &SweepReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "scanned": report.scanned,
                "referenced": report.referenced,
                "removed": report.removed,
                "bytesReclaimed": report.bytes_reclaimed,
                "withinGrace": report.within_grace,
                "failed": report.failed,
                "dryRun": report.dry_run,
            }))?),
            OutputFormat::Quiet => Ok(report.removed.join("\n")),
            OutputFormat::Table => {
                let mut lines = vec![self.info(&report.summary())];
                let marker = if report.dry_run { "would remove" } else { "removed" };
                lines.extend(report.removed.iter().map(|name| format!("  {} {}", marker, name)));
                if report.failed > 0 {
                    lines.push(self.warning(&format!("{} file(s) could not be removed", report.failed)));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    fn format_page_table(&self, page: &ItineraryPage) -> String {
        if page.items.is_empty() {
            return self.colorize("No itineraries found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Route", "Status", "Created", "Near route"]);

        for record in &page.items {
            builder.push_record([
                record.id.to_string(),
                record.title.clone(),
                record.route.clone(),
                self.status(record.review_status),
                record.created_at.format("%Y-%m-%d %H:%M").to_string(),
                near_route(record),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\nShowing {} of {}", table, page.items.len(), page.total)
    }

    fn format_record_table(&self, record: &ItineraryRecord) -> String {
        let location = &record.proof.location;
        let photo = &record.proof.photo;

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["ID".to_string(), record.id.to_string()]);
        builder.push_record(["Title".to_string(), record.title.clone()]);
        builder.push_record(["Route".to_string(), record.route.clone()]);
        builder.push_record(["Duration".to_string(), record.duration.clone()]);
        builder.push_record(["Budget".to_string(), record.budget.clone()]);
        builder.push_record(["Highlights".to_string(), record.highlights.clone()]);
        builder.push_record(["Status".to_string(), self.status(record.review_status)]);
        builder.push_record(["Created".to_string(), record.created_at.to_rfc3339()]);
        if let Some(reviewed_at) = record.reviewed_at {
            builder.push_record(["Reviewed".to_string(), reviewed_at.to_rfc3339()]);
        }
        if let Some(note) = &record.review_note {
            builder.push_record(["Note".to_string(), note.clone()]);
        }
        builder.push_record([
            "Location".to_string(),
            format!("{}, {}", location.latitude, location.longitude),
        ]);
        builder.push_record([
            "Photo".to_string(),
            format!("{} ({}, {} bytes)", photo.url, photo.mime_type.as_str(), photo.size_bytes),
        ]);
        builder.push_record(["Near route".to_string(), near_route(record)]);

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Confirmation line for a review decision.
    pub fn review_recorded(&self, record: &ItineraryRecord) -> String {
        self.success(&format!("Itinerary {} marked {}", record.id, record.review_status))
    }

    fn status(&self, status: ReviewStatus) -> String {
        let color = match status {
            ReviewStatus::Pending => "yellow",
            ReviewStatus::Approved => "green",
            ReviewStatus::Rejected => "red",
        };
        self.colorize(status.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn ids(records: &[ItineraryRecord]) -> String {
    records
        .iter()
        .map(|r| r.id.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Proximity verdict for tables: distance and whether it is inside the radius
fn near_route(record: &ItineraryRecord) -> String {
    match &record.proof.verification {
        Some(v) if v.available => {
            let place = v.matched_route_point.as_deref().unwrap_or("?");
            let distance = v.distance_km.map_or_else(|| "?".to_string(), |d| format!("{:.3}", d));
            let verdict = if v.within_radius { "yes" } else { "no" };
            format!("{} ({} km from {})", verdict, distance, place)
        }
        Some(_) => "unknown route".to_string(),
        None => "-".to_string(),
    }
}
