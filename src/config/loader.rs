//! Settings file loading.

use std::fs;
use std::path::Path;

use crate::config::schema::Settings;
use crate::error::{Error, Result};

/// Load settings from `path`, or defaults when no path is given.
///
/// An explicitly requested file that does not exist is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => load_settings_file(path),
        None => Ok(Settings::default()),
    }
}

/// Load and parse a settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let settings = parse_settings(&content, path)?;
    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Parse YAML content into [`Settings`].
///
/// An empty document yields the defaults.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| Error::Config {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
