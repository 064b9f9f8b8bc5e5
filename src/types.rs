use std::str::FromStr;

use serde::Deserialize;

/// Where execution plans are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStorageMode {
    /// One JSON file per plan under `plan_dir`.
    File,
    /// In memory only (lost when the process exits).
    Memory,
}

impl Default for PlanStorageMode {
    fn default() -> Self {
        PlanStorageMode::Memory
    }
}

impl FromStr for PlanStorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(PlanStorageMode::File),
            "memory" => Ok(PlanStorageMode::Memory),
            other => Err(format!(
                "invalid plan_storage: {other} (expected \"file\" or \"memory\")"
            )),
        }
    }
}
