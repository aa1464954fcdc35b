pub mod init;
pub mod list;
pub mod update;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::model::{IndexStyle, Strategy, TimeZone};

/// Command-line values that take precedence over `blogdex.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub strategy: Option<Strategy>,
    pub style: Option<IndexStyle>,
    pub source_dir: Option<String>,
    pub base_url: Option<String>,
    pub utc: bool,
}

impl Overrides {
    pub fn apply(self, config: &mut Config) {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(dir) = self.source_dir {
            config.source_dir = Some(dir);
        }
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if self.utc {
            config.timezone = TimeZone::Utc;
        }
    }
}

/// Load the layered config: defaults, then the config file, then CLI overrides.
pub fn resolve_config(
    fs: &dyn FileSystem,
    root: &Path,
    config_path: Option<&Path>,
    overrides: Overrides,
) -> Result<Config> {
    let mut config = Config::load(fs, root, config_path)?;
    overrides.apply(&mut config);
    Ok(config)
}
