use std::collections::BTreeSet;

use crate::model::ArticleRecord;
use crate::store::timestamps::TimestampStore;

/// Merge the changed set with previously cached instants.
///
/// Every path in `paths` yields exactly one record, in the same order:
/// changed or never-seen paths get `now`, the rest keep their cached value.
/// Cached paths that are no longer enumerated are dropped.
pub fn reconcile(
    paths: &[String],
    changed: &BTreeSet<String>,
    previous: &TimestampStore,
    now: i64,
) -> Vec<ArticleRecord> {
    paths
        .iter()
        .map(|path| {
            let last_modified = if changed.contains(path) {
                now
            } else {
                previous.get(path).unwrap_or(now)
            };
            ArticleRecord::new(path.clone(), last_modified)
        })
        .collect()
}

/// Number of records whose instant differs from (or is missing in) `previous`.
pub fn count_changed(records: &[ArticleRecord], previous: &TimestampStore) -> usize {
    records
        .iter()
        .filter(|r| previous.get(&r.path) != Some(r.last_modified))
        .count()
}
