use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How each article obtains its modification instant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum Strategy {
    /// Files reported changed by git get "now"; the rest keep their cached instant.
    #[default]
    Git,
    /// Read the modification time from filesystem metadata.
    Mtime,
}

/// Layout of the rendered index.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum IndexStyle {
    /// Two-column markdown table with the formatted modification time.
    #[default]
    Table,
    /// Bulleted list of links.
    List,
}

/// Zone used when formatting instants for humans.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum TimeZone {
    #[default]
    Local,
    Utc,
}

/// One article and the instant it last changed, in milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub path: String,
    pub last_modified: i64,
}

impl ArticleRecord {
    pub fn new(path: impl Into<String>, last_modified: i64) -> Self {
        Self {
            path: path.into(),
            last_modified,
        }
    }

    /// Final path segment, used as the link label.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Git => write!(f, "git"),
            Self::Mtime => write!(f, "mtime"),
        }
    }
}

impl std::fmt::Display for IndexStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::List => write!(f, "list"),
        }
    }
}
