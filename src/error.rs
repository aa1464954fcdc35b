use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogdexError {
    #[error("cannot read article directory {}: {source}", .dir.display())]
    Enumeration {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("{0} is not inside a git repository (use --strategy mtime outside git)")]
    NotGitRepository(String),

    #[error("invalid time format '{0}'")]
    InvalidTimeFormat(String),

    #[error("timestamp {millis} for '{path}' is out of range")]
    InvalidTimestamp { path: String, millis: i64 },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("config already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BlogdexError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Enumeration { .. } => "enumeration_failed",
            Self::NotGitRepository(_) => "not_git_repository",
            Self::InvalidTimeFormat(_) => "invalid_time_format",
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
            Self::Config { .. } => "invalid_config",
            Self::AlreadyInitialized(_) => "already_initialized",
            Self::Write { .. } => "write_failed",
            Self::Git(_) => "git_error",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogdexError>;
