use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BlogdexError, Result};
use crate::fs::FileSystem;
use crate::model::{IndexStyle, Strategy, TimeZone};

/// File name looked up at the repository root when `--config` is not given.
pub const CONFIG_FILE: &str = "blogdex.json";

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a run needs to know, as stored in `blogdex.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_url: Option<String>,
    /// Full header override. When set, `title`, `issues_url` and `columns` are ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub base_url: String,
    pub time_format: String,
    pub timezone: TimeZone,
    pub style: IndexStyle,
    pub columns: [String; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    pub exclude: Vec<String>,
    pub strategy: Strategy,
    pub index_file: String,
    pub cache_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Blog".into(),
            issues_url: None,
            header: None,
            base_url: String::new(),
            time_format: DEFAULT_TIME_FORMAT.into(),
            timezone: TimeZone::Local,
            style: IndexStyle::Table,
            columns: ["Article".into(), "Modified".into()],
            source_dir: None,
            exclude: vec!["README.md".into()],
            strategy: Strategy::Git,
            index_file: "README.md".into(),
            cache_file: "update.json".into(),
        }
    }
}

/// Inputs of the file enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory holding the articles, relative to the repository root.
    pub source_dir: Option<String>,
    /// File names (or root-relative paths) never listed as articles.
    pub excluded: Vec<String>,
}

/// Inputs of the index renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub header: String,
    pub base_url: String,
    pub time_format: String,
    pub timezone: TimeZone,
    pub style: IndexStyle,
}

impl Config {
    /// Load the config for `root`.
    ///
    /// An explicit path must exist. Without one, `blogdex.json` at the root is
    /// used when present and defaults apply otherwise.
    pub fn load(fs: &dyn FileSystem, root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = root.join(CONFIG_FILE);
                match fs.read_file(&path) {
                    Ok(data) => return Self::parse(&path, &data),
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                        return Ok(Self::default());
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        };
        let data = fs.read_file(&path).map_err(|err| BlogdexError::Config {
            path: path.clone(),
            message: err.to_string(),
        })?;
        Self::parse(&path, &data)
    }

    fn parse(path: &Path, data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|err| BlogdexError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.index_file)
    }

    pub fn cache_path(&self, root: &Path) -> PathBuf {
        root.join(&self.cache_file)
    }

    pub fn scan(&self) -> ScanConfig {
        let mut excluded = self.exclude.clone();
        if !excluded.contains(&self.index_file) {
            excluded.push(self.index_file.clone());
        }
        ScanConfig {
            source_dir: self
                .source_dir
                .as_deref()
                .map(|dir| dir.trim_matches('/').to_string())
                .filter(|dir| !dir.is_empty()),
            excluded,
        }
    }

    pub fn render(&self) -> RenderConfig {
        RenderConfig {
            header: self.header.clone().unwrap_or_else(|| self.default_header()),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            time_format: self.time_format.clone(),
            timezone: self.timezone,
            style: self.style,
        }
    }

    fn default_header(&self) -> String {
        let title = match &self.issues_url {
            Some(url) => format!("# [{}]({})\n", self.title, url),
            None => format!("# {}\n", self.title),
        };
        match self.style {
            IndexStyle::Table => format!(
                "{title}| {} | {} |\n|:---|:------------|\n",
                self.columns[0], self.columns[1]
            ),
            IndexStyle::List => format!("{title}\n"),
        }
    }
}
