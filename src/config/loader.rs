// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// Relative `plan_dir` values are resolved against the config file's
/// directory, so the same config behaves the same from any working directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let mut raw_config = load_from_path(path)?;

    let plan_dir = &raw_config.config.plan_dir;
    if plan_dir.is_relative() && !plan_dir.as_os_str().is_empty() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            raw_config.config.plan_dir = parent.join(&raw_config.config.plan_dir);
        }
    }

    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if given; otherwise load the default config file if one
/// exists, falling back to built-in defaults.
///
/// An explicitly given path that does not exist is an error.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(p) => load_and_validate(p),
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                load_and_validate(&default_path)
            } else {
                debug!(path = ?default_path, "no config file; using defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}

/// `Backlogc.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Backlogc.toml")
}
