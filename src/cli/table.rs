//! Rendering of inspection results
//!
//! Every renderer returns a `String` so the shell decides where it goes.
//!
//! # Formats
//!
//! - `Table`: separators, a `tabled` table per topic, and a result count
//! - `Tsv`: one record per line, no decoration
//! - `Json`: pretty-printed result structures

use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_tsv, result_count, separator};
use crate::cli::OutputFormat;
use crate::core::inspector::{InspectionResult, OffsetRange, TopicListing, TopicOffsets};

/// Marker printed in TSV output for a topic without partitions
pub const TSV_NO_PARTITIONS: &str = "-";

/// Render a topic listing
pub fn render_listing(listing: &TopicListing, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(listing_table(listing)),
        OutputFormat::Tsv => Ok(listing
            .topics
            .iter()
            .map(|t| format!("{}\n", escape_tsv(t)))
            .collect()),
        OutputFormat::Json => to_json(listing),
    }
}

/// Render partition offsets for each requested topic
pub fn render_offsets(result: &InspectionResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(offsets_table(result)),
        OutputFormat::Tsv => Ok(offsets_tsv(result)),
        OutputFormat::Json => to_json(result),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

fn listing_table(listing: &TopicListing) -> String {
    let mut out = String::new();
    if listing.count() > 0 {
        out.push_str(&separator());
        out.push('\n');
        for topic in &listing.topics {
            out.push_str(topic);
            out.push('\n');
        }
        out.push_str(&separator());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&result_count(listing.count()));
    out.push_str("\n\n");
    out
}

fn offsets_table(result: &InspectionResult) -> String {
    let mut out = String::new();
    for report in &result.topics {
        out.push_str(&separator());
        out.push('\n');
        match &report.offsets {
            TopicOffsets::Found { partitions } => {
                out.push_str(&style(&report.topic).bold().to_string());
                out.push('\n');
                out.push_str(&partition_table(partitions.iter()));
                out.push('\n');
            }
            TopicOffsets::NoPartitions => {
                out.push_str(&format!("No partitions found for topic {}\n", report.topic));
            }
        }
    }
    out.push_str(&separator());
    out.push_str("\n\n");
    out
}

fn partition_table<'a>(partitions: impl Iterator<Item = (&'a i32, &'a OffsetRange)>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Partition", "Begin", "End", "Messages"]);
    for (id, range) in partitions {
        builder.push_record([
            id.to_string(),
            range.begin().to_string(),
            range.end().to_string(),
            range.message_count().to_string(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn offsets_tsv(result: &InspectionResult) -> String {
    let mut out = String::new();
    for report in &result.topics {
        let topic = escape_tsv(&report.topic);
        match &report.offsets {
            TopicOffsets::Found { partitions } => {
                for (id, range) in partitions {
                    out.push_str(&format!("{}\t{}\t{}\t{}\n", topic, id, range.begin(), range.end()));
                }
            }
            TopicOffsets::NoPartitions => {
                out.push_str(&format!("{}\t{}\n", topic, TSV_NO_PARTITIONS));
            }
        }
    }
    out
}
