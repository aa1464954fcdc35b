use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::error::{BlogdexError, Result};
use crate::fs::FileSystem;

const MARKDOWN_SUFFIX: &str = ".md";

/// True for `<something>.md`, compared case-insensitively.
pub fn is_markdown(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.len() > MARKDOWN_SUFFIX.len() && lower.ends_with(MARKDOWN_SUFFIX)
}

/// Directory the articles are read from.
pub fn article_dir(root: &Path, scan: &ScanConfig) -> PathBuf {
    match &scan.source_dir {
        Some(dir) => root.join(dir),
        None => root.to_path_buf(),
    }
}

/// List article paths relative to `root`, sorted by name.
///
/// An unreadable directory is an error: nothing downstream may run on a
/// file list that was never actually read.
pub fn enumerate(fs: &dyn FileSystem, root: &Path, scan: &ScanConfig) -> Result<Vec<String>> {
    let dir = article_dir(root, scan);
    let entries = fs
        .list_dir(&dir)
        .map_err(|source| BlogdexError::Enumeration {
            dir: dir.clone(),
            source,
        })?;

    let mut paths: Vec<String> = entries
        .into_iter()
        .filter(|entry| entry.is_file && is_markdown(&entry.name))
        .filter_map(|entry| {
            let rel = match &scan.source_dir {
                Some(dir) => format!("{dir}/{}", entry.name),
                None => entry.name.clone(),
            };
            let excluded = scan
                .excluded
                .iter()
                .any(|ex| *ex == entry.name || *ex == rel);
            (!excluded).then_some(rel)
        })
        .collect();
    paths.sort();
    Ok(paths)
}
