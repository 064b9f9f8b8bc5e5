// src/order/mod.rs

//! Deterministic ordering of a validated backlog.
//!
//! [`order`] runs Kahn's algorithm over `depends_on` edges and emits the
//! result as waves: wave `k + 1` holds the items whose last unresolved
//! dependency was released by wave `k`. Within a wave, items are sorted by
//! `priority_score` descending, then id ascending.
//!
//! `parent_id` plays no role here. A story can land in the same wave as its
//! feature, or an earlier one.

pub mod plan;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{BacklogNode, ItemId, ValidatedBacklog};

pub use plan::OrderedPlan;

/// Order a validated backlog into waves and a total order.
///
/// Pure and total over [`ValidatedBacklog`]: the arena is acyclic with every
/// reference resolved, so every item lands in exactly one wave.
pub fn order(backlog: &ValidatedBacklog) -> OrderedPlan {
    let mut in_degree: BTreeMap<&str, usize> = backlog
        .nodes()
        .map(|node| (node.id(), node.depends_on().len()))
        .collect();

    let mut current: Vec<&BacklogNode> = backlog
        .nodes()
        .filter(|node| node.depends_on().is_empty())
        .collect();

    let mut waves: Vec<Vec<ItemId>> = Vec::new();
    let mut placed = 0usize;

    while !current.is_empty() {
        current.sort_by(|a, b| wave_order(a, b));

        let mut next: Vec<&BacklogNode> = Vec::new();
        for node in &current {
            for dependent in backlog.dependents_of(node.id()) {
                let Some(deg) = in_degree.get_mut(dependent.as_str()) else {
                    continue;
                };
                *deg = deg.saturating_sub(1);
                if *deg == 0 {
                    if let Some(dep_node) = backlog.get(dependent) {
                        next.push(dep_node);
                    }
                }
            }
        }

        placed += current.len();
        debug!(
            wave = waves.len(),
            size = current.len(),
            "wave assembled"
        );
        waves.push(current.iter().map(|n| n.id().to_string()).collect());
        current = next;
    }

    debug_assert_eq!(placed, backlog.len(), "validated backlog must be acyclic");

    OrderedPlan::from_waves(waves)
}

/// Priority descending, then id ascending.
fn wave_order(a: &BacklogNode, b: &BacklogNode) -> Ordering {
    b.priority_score()
        .cmp(&a.priority_score())
        .then_with(|| a.id().cmp(b.id()))
}
