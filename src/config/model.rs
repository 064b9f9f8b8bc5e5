// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::PlanStorageMode;

/// Configuration as read from TOML, before validation.
///
/// ```toml
/// [config]
/// plan_storage = "file"
/// plan_dir = ".backlogc/plans"
///
/// [lint]
/// id_convention = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub lint: LintSection,
}

/// `[config]` section: where plans live.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// `"memory"` (default) or `"file"`.
    #[serde(default)]
    pub plan_storage: PlanStorageMode,

    /// Directory for `<hash>.json` plan files when `plan_storage = "file"`.
    ///
    /// Relative paths resolve against the config file's directory.
    #[serde(default = "default_plan_dir")]
    pub plan_dir: PathBuf,
}

fn default_plan_dir() -> PathBuf {
    PathBuf::from(".backlogc/plans")
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            plan_storage: PlanStorageMode::default(),
            plan_dir: default_plan_dir(),
        }
    }
}

/// `[lint]` section: non-fatal advisories.
#[derive(Debug, Clone, Deserialize)]
pub struct LintSection {
    /// Report ids that do not carry their level prefix (`E`/`F`/`S` + digits).
    #[serde(default = "default_true")]
    pub id_convention: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LintSection {
    fn default() -> Self {
        Self {
            id_convention: default_true(),
        }
    }
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`
/// or [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub lint: LintSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, lint: LintSection) -> Self {
        Self { config, lint }
    }
}
