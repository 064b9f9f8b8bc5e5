// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidBacklog(ValidationErrors),

    #[error("Plan store error: {0}")]
    PlanStore(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CompilerError>;
