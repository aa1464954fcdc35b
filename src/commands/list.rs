use std::path::Path;

use chrono::Utc;

use crate::config::Config;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::output::{self, Format};
use crate::pipeline;
use crate::render::{TimeFormat, sort_newest_first};

/// Show what the next `update` would index, newest first, without writing anything.
pub fn run(fs: &dyn FileSystem, root: &Path, config: &Config, format: Format) -> Result<()> {
    let now = Utc::now().timestamp_millis();
    let reconciled = pipeline::reconcile_articles(fs, root, config, now)?;
    let records = sort_newest_first(&reconciled.records);
    let time = TimeFormat::new(&config.time_format, config.timezone)?;
    output::print_records(&records, &time, format)
}
