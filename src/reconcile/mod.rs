// src/reconcile/mod.rs

//! Identity-based diff between an accepted sibling set and a regenerated one.
//!
//! Matching is by id equality only. A rewritten title never turns an add +
//! drop pair into a "rename"; relating those is left to a human.
//!
//! This module only reports. Applying a report (updating storage, keeping
//! lineage, confirming drops) is the caller's job.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{BacklogItem, ItemId};

/// Partition of ids across `existing` ∪ `candidate`, each list ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// In both sets. Content may differ; no content diff is computed.
    pub kept: Vec<ItemId>,
    /// Only in `existing`.
    pub dropped: Vec<ItemId>,
    /// Only in `candidate`.
    pub added: Vec<ItemId>,
}

impl ReconciliationReport {
    /// Same ids on both sides.
    pub fn is_unchanged(&self) -> bool {
        self.dropped.is_empty() && self.added.is_empty()
    }

    /// Applying this report would delete items, so a human must confirm it
    /// first.
    pub fn requires_confirmation(&self) -> bool {
        !self.dropped.is_empty()
    }
}

/// Diff two sets by id.
///
/// Accepts anything that yields item references, e.g. `&[BacklogItem]` or
/// the output of [`sibling_set`]. Duplicate ids within one side collapse.
pub fn reconcile<'a, E, C>(existing: E, candidate: C) -> ReconciliationReport
where
    E: IntoIterator<Item = &'a BacklogItem>,
    C: IntoIterator<Item = &'a BacklogItem>,
{
    let existing: BTreeSet<&str> = existing.into_iter().map(|i| i.id.as_str()).collect();
    let candidate: BTreeSet<&str> = candidate.into_iter().map(|i| i.id.as_str()).collect();

    let report = ReconciliationReport {
        kept: existing.intersection(&candidate).map(|s| s.to_string()).collect(),
        dropped: existing.difference(&candidate).map(|s| s.to_string()).collect(),
        added: candidate.difference(&existing).map(|s| s.to_string()).collect(),
    };

    debug!(
        kept = report.kept.len(),
        dropped = report.dropped.len(),
        added = report.added.len(),
        "reconciled sibling sets"
    );
    if report.requires_confirmation() {
        warn!(dropped = ?report.dropped, "regenerated set drops existing items");
    }

    report
}

/// Direct children of `parent_id` (or top-level items for `None`), in input
/// order.
///
/// Used to pull the sibling set a subtree regeneration replaces, e.g. the
/// features under one epic.
pub fn sibling_set<'a>(items: &'a [BacklogItem], parent_id: Option<&str>) -> Vec<&'a BacklogItem> {
    items
        .iter()
        .filter(|item| item.parent_id.as_deref() == parent_id)
        .collect()
}
