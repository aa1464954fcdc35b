use std::fmt::Display;

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::error::Result;
use crate::model::ArticleRecord;
use crate::render::TimeFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

/// Print a non-fatal diagnostic to stderr.
pub fn warn(message: impl Display) {
    eprintln!("{} {message}", "warning:".yellow().bold());
}

/// Result of an `update` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub articles: usize,
    pub changed: usize,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
    /// Index text that a dry run would have written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

pub fn print_summary(summary: &UpdateSummary, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(summary)?),
        Format::Pretty => {
            println!(
                "{} {} articles ({} changed)",
                "indexed".green().bold(),
                summary.articles,
                summary.changed
            );
            if let Some(ref index) = summary.index {
                println!("  {} {}", "index:".dimmed(), index);
            }
            if let Some(ref cache) = summary.cache {
                println!("  {} {}", "cache:".dimmed(), cache);
            }
        }
        Format::Minimal => println!("{} {}", summary.articles, summary.changed),
    }
    Ok(())
}

pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() > max_len {
        let truncated: String = name.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        name.to_string()
    }
}

/// Print records in the order given, which callers keep newest first.
pub fn print_records(records: &[ArticleRecord], time: &TimeFormat, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(records)?),
        Format::Pretty => {
            if records.is_empty() {
                println!("{}", "No articles.".dimmed());
            }
            for record in records {
                println!("{}  {}", time.format(record)?.dimmed(), record.path);
            }
        }
        Format::Minimal => {
            println!("{:<24} MODIFIED", "ARTICLE");
            println!("{}", "-".repeat(50));
            for record in records {
                println!(
                    "{:<24} {}",
                    truncate_name(record.file_name(), 24),
                    time.format(record)?
                );
            }
        }
    }
    Ok(())
}
