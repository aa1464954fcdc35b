//! Filesystem boundary used by the enumerator, the timestamp store and the writer.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::output;

/// A single directory entry as seen by [`FileSystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_file: bool,
}

/// Metadata subset the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Modification instant in milliseconds since the epoch.
    pub modified: i64,
}

pub trait FileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;
    fn stat_file(&self, path: &Path) -> io::Result<FileStat>;
    fn read_file(&self, path: &Path) -> io::Result<String>;
    /// Replace the file at `path`. Readers never observe a half-written file.
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // Non-UTF-8 names cannot be stored as keys or rendered as links.
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    output::warn(format!(
                        "skipping {}: file name is not valid UTF-8",
                        dir.join(raw).display()
                    ));
                    continue;
                }
            };
            let file_type = entry.file_type()?;
            // Symlinked articles count when their target is a regular file.
            let is_file = if file_type.is_symlink() {
                fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file())
            } else {
                file_type.is_file()
            };
            entries.push(DirEntry { name, is_file });
        }
        Ok(entries)
    }

    fn stat_file(&self, path: &Path) -> io::Result<FileStat> {
        let modified = fs::metadata(path)?.modified()?;
        Ok(FileStat {
            modified: DateTime::<Utc>::from(modified).timestamp_millis(),
        })
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        let Some(file_name) = path.file_name() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' has no file name", path.display()),
            ));
        };
        let staging = path.with_file_name(format!(
            ".{}.{}.tmp",
            file_name.to_string_lossy(),
            Uuid::new_v4()
        ));

        if let Err(err) = fs::write(&staging, contents) {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }
        if let Err(err) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }
        Ok(())
    }
}
