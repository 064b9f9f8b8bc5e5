// src/plan/identity.rs

//! Content-addressed backlog identity.
//!
//! Only the structural tuple `(id, level, priority_score, depends_on,
//! parent_id)` is hashed. Titles and descriptions are prose and never move
//! the hash.
//!
//! Canonical form: a JSON array of one object per item, ascending by id;
//! object keys sorted, no whitespace, `depends_on` sorted, `priority_score`
//! an integer literal, `parent_id` `null` for epics. The hash is the
//! lowercase hex SHA-256 of the UTF-8 bytes.
//!
//! Key order comes from the field order of [`StructuralItem`], never from a
//! JSON map, so it holds whatever features `serde_json` is built with.

use std::collections::BTreeSet;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::model::{BacklogNode, ItemId, Level, ValidatedBacklog};

/// Lowercase hex SHA-256 digest (64 chars).
pub type BacklogHash = String;

/// The canonical serialization that [`identity`] hashes.
pub fn canonical_json(backlog: &ValidatedBacklog) -> String {
    // `nodes()` iterates ascending by id and `depends_on` is a BTreeSet.
    let items: Vec<StructuralItem<'_>> = backlog.nodes().map(StructuralItem::from).collect();
    // Plain strings, integers and sets always serialize.
    serde_json::to_string(&items).unwrap_or_else(|e| unreachable!("structural item: {e}"))
}

/// SHA-256 over [`canonical_json`].
pub fn identity(backlog: &ValidatedBacklog) -> BacklogHash {
    let canonical = canonical_json(backlog);

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    debug!(hash = %hash, items = backlog.len(), "computed backlog hash");
    hash
}

/// The hashed fields of one item. Fields are declared in ascending key order.
#[derive(Serialize)]
struct StructuralItem<'a> {
    depends_on: &'a BTreeSet<ItemId>,
    id: &'a str,
    level: Level,
    parent_id: Option<&'a str>,
    priority_score: i64,
}

impl<'a> From<&'a BacklogNode> for StructuralItem<'a> {
    fn from(node: &'a BacklogNode) -> Self {
        Self {
            depends_on: node.depends_on(),
            id: node.id(),
            level: node.level(),
            parent_id: node.parent_id(),
            priority_score: node.priority_score(),
        }
    }
}

/// Whether `s` looks like a [`BacklogHash`].
pub fn is_backlog_hash(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
