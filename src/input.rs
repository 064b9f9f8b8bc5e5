// src/input.rs

//! Loading backlog sets from JSON.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::Result;
use crate::model::BacklogItem;

#[derive(Debug, Deserialize)]
struct WrappedBacklog {
    items: Vec<BacklogItem>,
}

/// Parse a backlog from a JSON string: either a bare array of items or an
/// object with an `items` array.
pub fn parse_backlog(contents: &str) -> Result<Vec<BacklogItem>> {
    if contents.trim_start().starts_with('[') {
        Ok(serde_json::from_str(contents)?)
    } else {
        let wrapped: WrappedBacklog = serde_json::from_str(contents)?;
        Ok(wrapped.items)
    }
}

/// Read and parse a backlog file.
pub fn load_backlog(path: impl AsRef<Path>) -> Result<Vec<BacklogItem>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let items = parse_backlog(&contents)?;
    debug!(path = ?path, items = items.len(), "loaded backlog");
    Ok(items)
}
