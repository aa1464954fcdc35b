//! Timestamp sources: where each article's modification instant comes from.

use std::path::Path;

use crate::error::Result;
use crate::fs::FileSystem;
use crate::git::{GitRepo, VersionControl};
use crate::model::{ArticleRecord, Strategy};
use crate::reconcile::reconcile;
use crate::store::timestamps::TimestampStore;

/// Stamp each path with its filesystem modification time.
pub fn from_metadata(
    fs: &dyn FileSystem,
    root: &Path,
    paths: &[String],
) -> Result<Vec<ArticleRecord>> {
    paths
        .iter()
        .map(|path| -> Result<ArticleRecord> {
            let stat = fs.stat_file(&root.join(path))?;
            Ok(ArticleRecord::new(path.clone(), stat.modified))
        })
        .collect()
}

/// Stamp each path from the version-control changed set and the cache.
pub fn from_version_control(
    vcs: &dyn VersionControl,
    prefix: &str,
    paths: &[String],
    previous: &TimestampStore,
    now: i64,
) -> Result<Vec<ArticleRecord>> {
    let changed = vcs.status()?.changed_set(prefix);
    Ok(reconcile(paths, &changed, previous, now))
}

/// Run the configured strategy against the real repository at `root`.
pub fn collect(
    strategy: Strategy,
    fs: &dyn FileSystem,
    root: &Path,
    paths: &[String],
    previous: &TimestampStore,
    now: i64,
) -> Result<Vec<ArticleRecord>> {
    match strategy {
        Strategy::Mtime => from_metadata(fs, root, paths),
        Strategy::Git => {
            let repo = GitRepo::discover(root)?;
            from_version_control(&repo, repo.root_prefix(), paths, previous, now)
        }
    }
}
