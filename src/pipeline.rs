//! The batch run: enumerate, timestamp, reconcile, render, write.

use std::path::Path;

use crate::config::Config;
use crate::error::{BlogdexError, Result};
use crate::fs::FileSystem;
use crate::model::ArticleRecord;
use crate::output;
use crate::reconcile::count_changed;
use crate::render::render;
use crate::scan::enumerate;
use crate::source;
use crate::store::timestamps::TimestampStore;

/// Reconciled state of one run, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// One record per enumerated article, in enumeration order.
    pub records: Vec<ArticleRecord>,
    /// Replacement for the on-disk cache.
    pub store: TimestampStore,
    /// Articles whose instant differs from the previous cache.
    pub changed: usize,
}

/// Enumerate articles and assign each one an instant. `now` is the run's start instant.
pub fn reconcile_articles(
    fs: &dyn FileSystem,
    root: &Path,
    config: &Config,
    now: i64,
) -> Result<Reconciled> {
    let paths = enumerate(fs, root, &config.scan())?;
    let previous = TimestampStore::load(fs, &config.cache_path(root));
    let records = source::collect(config.strategy, fs, root, &paths, &previous, now)?;
    let changed = count_changed(&records, &previous);
    let store = TimestampStore::from_records(&records);
    Ok(Reconciled {
        records,
        store,
        changed,
    })
}

/// Render the index document for a reconciled run.
pub fn render_index(reconciled: &Reconciled, config: &Config) -> Result<String> {
    render(&reconciled.records, &config.render())
}

/// Persist the index and the cache.
///
/// Both writes are attempted even if the first fails; the first failure is returned.
pub fn write_outputs(
    fs: &dyn FileSystem,
    root: &Path,
    config: &Config,
    index: &str,
    store: &TimestampStore,
) -> Result<()> {
    let index_path = config.index_path(root);
    let index_result = fs
        .write_file(&index_path, index)
        .map_err(|source| BlogdexError::Write {
            path: index_path,
            source,
        });
    let cache_result = store.save(fs, &config.cache_path(root));

    match (index_result, cache_result) {
        (Err(index_err), Err(cache_err)) => {
            output::warn(&cache_err);
            Err(index_err)
        }
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
        (Ok(()), Ok(())) => Ok(()),
    }
}
