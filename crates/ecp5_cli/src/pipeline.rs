//! Project discovery shared by the commands.

use std::path::{Path, PathBuf};

use ecp5_config::{ProjectConfig, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// Finds the project root by walking up from `start` looking for `ecp5.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Loads the project configuration selected by the global CLI args.
///
/// With `--config` pointing at a file, that file is loaded and its directory
/// is the project root; pointing at a directory loads `ecp5.toml` from it.
/// Otherwise the current directory and its parents are searched.
pub fn load_project(
    global: &GlobalArgs,
) -> Result<(PathBuf, ProjectConfig), Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => {
            let path = PathBuf::from(config_path);
            if path.is_file() {
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
                Ok((root, ecp5_config::load_config_from_str(&content)?))
            } else {
                let config = ecp5_config::load_config(&path)?;
                Ok((path, config))
            }
        }
        None => {
            let root = find_project_root(&std::env::current_dir()?)?;
            let config = ecp5_config::load_config(&root)?;
            Ok((root, config))
        }
    }
}
