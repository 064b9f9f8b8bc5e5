// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CompilerError, Result};
use crate::types::PlanStorageMode;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CompilerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.lint))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_plan_storage(cfg)?;
    Ok(())
}

fn validate_plan_storage(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.plan_storage != PlanStorageMode::File {
        return Ok(());
    }

    if cfg.config.plan_dir.as_os_str().is_empty() {
        return Err(CompilerError::ConfigError(
            "[config].plan_dir must not be empty when plan_storage = \"file\"".to_string(),
        ));
    }

    if cfg.config.plan_dir.is_file() {
        return Err(CompilerError::ConfigError(format!(
            "[config].plan_dir {:?} is a file, expected a directory",
            cfg.config.plan_dir
        )));
    }

    Ok(())
}
