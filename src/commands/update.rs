use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::output::{self, Format, UpdateSummary};
use crate::pipeline;

pub fn run(
    fs: &dyn FileSystem,
    root: &Path,
    config: &Config,
    dry_run: bool,
    format: Format,
) -> Result<()> {
    let now = Utc::now().timestamp_millis();
    let reconciled = pipeline::reconcile_articles(fs, root, config, now)?;
    let index = pipeline::render_index(&reconciled, config)?;

    if dry_run {
        let summary = UpdateSummary {
            articles: reconciled.records.len(),
            changed: reconciled.changed,
            dry_run: true,
            index: None,
            cache: None,
            rendered: Some(index),
        };
        if format == Format::Json {
            return output::print_summary(&summary, format);
        }
        if let Some(ref rendered) = summary.rendered {
            print!("{rendered}");
        }
        eprintln!(
            "{} {} articles, {} changed (nothing written)",
            "dry run:".dimmed(),
            summary.articles,
            summary.changed
        );
        return Ok(());
    }

    pipeline::write_outputs(fs, root, config, &index, &reconciled.store)?;

    let summary = UpdateSummary {
        articles: reconciled.records.len(),
        changed: reconciled.changed,
        dry_run: false,
        index: Some(config.index_path(root).display().to_string()),
        cache: Some(config.cache_path(root).display().to_string()),
        rendered: None,
    };
    output::print_summary(&summary, format)
}
