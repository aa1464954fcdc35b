use std::path::Path;

use colored::Colorize;

use crate::config::{CONFIG_FILE, Config};
use crate::error::{BlogdexError, Result};
use crate::fs::FileSystem;

/// Write a default `blogdex.json` into `root`.
pub fn run(fs: &dyn FileSystem, root: &Path) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    if fs.read_file(&path).is_ok() {
        return Err(BlogdexError::AlreadyInitialized(path));
    }

    let mut json = serde_json::to_string_pretty(&Config::default())?;
    json.push('\n');
    fs.write_file(&path, &json)
        .map_err(|source| BlogdexError::Write {
            path: path.clone(),
            source,
        })?;

    eprintln!("{} {}", "Created".green(), path.display());
    Ok(())
}
