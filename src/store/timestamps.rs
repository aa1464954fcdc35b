use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BlogdexError, Result};
use crate::fs::FileSystem;
use crate::model::ArticleRecord;
use crate::output;

/// Last-known modification instant per article path, persisted between runs.
///
/// On disk this is a pretty-printed JSON object mapping root-relative paths
/// to milliseconds since the epoch, e.g. `{"docs/a.md": 1700000000000}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampStore {
    entries: BTreeMap<String, i64>,
}

impl TimestampStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<i64> {
        self.entries.get(path).copied()
    }

    pub fn insert(&mut self, path: impl Into<String>, millis: i64) {
        self.entries.insert(path.into(), millis);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn from_records(records: &[ArticleRecord]) -> Self {
        Self {
            entries: records
                .iter()
                .map(|r| (r.path.clone(), r.last_modified))
                .collect(),
        }
    }

    /// Read the store. `Ok(None)` when the file does not exist.
    pub fn try_load(fs: &dyn FileSystem, path: &Path) -> Result<Option<Self>> {
        let data = match fs.read_file(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let store: Self = serde_json::from_str(&data)?;
        Ok(Some(store))
    }

    /// Read the store, substituting an empty one if it is missing or unreadable.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Self {
        match Self::try_load(fs, path) {
            Ok(Some(store)) => store,
            Ok(None) => Self::new(),
            Err(err) => {
                output::warn(format!(
                    "ignoring timestamp cache {}: {err}",
                    path.display()
                ));
                Self::new()
            }
        }
    }

    pub fn save(&self, fs: &dyn FileSystem, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs.write_file(path, &json)
            .map_err(|source| BlogdexError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
