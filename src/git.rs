use std::collections::BTreeSet;
use std::path::Path;

use git2::{Repository, Status, StatusOptions};

use crate::error::{BlogdexError, Result};

/// Paths reported by the version-control layer as changed since the last commit.
///
/// Paths are relative to the work tree root and use forward slashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub modified: Vec<String>,
    pub created: Vec<String>,
    /// New-side paths of renamed entries.
    pub renamed: Vec<String>,
}

impl StatusReport {
    /// Merge all three collections into one set of paths relative to `prefix`.
    ///
    /// `prefix` is the article root relative to the work tree (empty when they
    /// coincide). Paths outside it are dropped.
    pub fn changed_set(&self, prefix: &str) -> BTreeSet<String> {
        let prefix = prefix.trim_matches('/');
        self.modified
            .iter()
            .chain(&self.created)
            .chain(&self.renamed)
            .filter_map(|path| {
                if prefix.is_empty() {
                    Some(path.clone())
                } else {
                    path.strip_prefix(prefix)
                        .and_then(|rest| rest.strip_prefix('/'))
                        .map(str::to_string)
                }
            })
            .collect()
    }
}

pub trait VersionControl {
    fn status(&self) -> Result<StatusReport>;
}

/// A git work tree opened with libgit2.
pub struct GitRepo {
    repo: Repository,
    root_prefix: String,
}

impl GitRepo {
    /// Find the repository containing `root`.
    pub fn discover(root: &Path) -> Result<Self> {
        let not_git = || BlogdexError::NotGitRepository(root.display().to_string());
        let repo = Repository::discover(root).map_err(|_| not_git())?;
        let workdir = repo.workdir().ok_or_else(not_git)?.canonicalize()?;
        let root = root.canonicalize()?;
        let rel = root.strip_prefix(&workdir).map_err(|_| not_git())?;
        let root_prefix = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self { repo, root_prefix })
    }

    /// The article root relative to the work tree, empty if they are the same directory.
    pub fn root_prefix(&self) -> &str {
        &self.root_prefix
    }
}

impl VersionControl for GitRepo {
    fn status(&self) -> Result<StatusReport> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true)
            .renames_index_to_workdir(true);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut report = StatusReport::default();
        for entry in statuses.iter() {
            let status = entry.status();
            if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
                let new_path = entry
                    .index_to_workdir()
                    .and_then(|delta| delta.new_file().path().map(normalize))
                    .or_else(|| {
                        entry
                            .head_to_index()
                            .and_then(|delta| delta.new_file().path().map(normalize))
                    });
                if let Some(path) = new_path {
                    report.renamed.push(path);
                }
                continue;
            }

            let Some(path) = entry.path() else {
                continue;
            };
            if status.intersects(Status::INDEX_NEW | Status::WT_NEW) {
                report.created.push(path.replace('\\', "/"));
            } else if status.intersects(
                Status::INDEX_MODIFIED
                    | Status::WT_MODIFIED
                    | Status::INDEX_TYPECHANGE
                    | Status::WT_TYPECHANGE,
            ) {
                report.modified.push(path.replace('\\', "/"));
            }
        }
        Ok(report)
    }
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use std::fs;
    use tempfile::tempdir;

    fn commit_all(repo: &Repository) {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("blog", "blog@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, "update", &tree, &parents)
            .unwrap();
    }

    #[test]
    fn changed_set_dedups_and_merges() {
        let report = StatusReport {
            modified: vec!["a.md".into()],
            created: vec!["b.md".into(), "a.md".into()],
            renamed: vec!["c.md".into()],
        };
        let set: Vec<String> = report.changed_set("").into_iter().collect();
        assert_eq!(set, vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn changed_set_strips_prefix_and_drops_outsiders() {
        let report = StatusReport {
            modified: vec!["blog/docs/a.md".into(), "other/b.md".into()],
            created: vec!["blogger.md".into()],
            renamed: vec![],
        };
        let set: Vec<String> = report.changed_set("blog/").into_iter().collect();
        assert_eq!(set, vec!["docs/a.md"]);
    }

    #[test]
    fn discover_outside_git_is_an_error() {
        let dir = tempdir().unwrap();
        // tempdirs normally sit outside any repository; skip if not.
        if Repository::discover(dir.path()).is_ok() {
            return;
        }
        let err = GitRepo::discover(dir.path()).err().unwrap();
        assert_eq!(err.code(), "not_git_repository");
    }

    #[test]
    fn status_reports_modified_and_created_files() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("old.md"), "old").unwrap();
        fs::write(dir.path().join("edit.md"), "v1").unwrap();
        commit_all(&repo);

        fs::write(dir.path().join("edit.md"), "v2").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs").join("new.md"), "new").unwrap();

        let git = GitRepo::discover(dir.path()).unwrap();
        assert_eq!(git.root_prefix(), "");
        let report = git.status().unwrap();
        assert_eq!(report.modified, vec!["edit.md"]);
        assert_eq!(report.created, vec!["docs/new.md"]);
        assert!(report.renamed.is_empty());
    }

    #[test]
    fn staged_rename_reports_new_path() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("before.md"), "same content here\n").unwrap();
        commit_all(&repo);

        fs::rename(dir.path().join("before.md"), dir.path().join("after.md")).unwrap();
        let mut index = repo.index().unwrap();
        index.remove_path(Path::new("before.md")).unwrap();
        index.add_path(Path::new("after.md")).unwrap();
        index.write().unwrap();

        let report = GitRepo::discover(dir.path()).unwrap().status().unwrap();
        assert_eq!(report.renamed, vec!["after.md"]);
    }

    #[test]
    fn unstaged_rename_reports_new_path() {
        let dir = tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("before.md"), "same content here\n").unwrap();
        commit_all(&repo);

        fs::rename(dir.path().join("before.md"), dir.path().join("after.md")).unwrap();

        let report = GitRepo::discover(dir.path()).unwrap().status().unwrap();
        assert_eq!(report.renamed, vec!["after.md"]);
        assert!(report.created.is_empty());
        assert_eq!(report.changed_set(""), BTreeSet::from(["after.md".to_string()]));
    }

    #[test]
    fn subdirectory_root_has_prefix() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        fs::create_dir(dir.path().join("blog")).unwrap();

        let git = GitRepo::discover(&dir.path().join("blog")).unwrap();
        assert_eq!(git.root_prefix(), "blog");
    }
}
