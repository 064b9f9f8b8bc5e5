// src/validate/hierarchy.rs

//! Hierarchy bucket: id uniqueness and `parent_id` containment rules.
//!
//! Evaluated independently of the dependency bucket; `depends_on` plays no
//! part here.

use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::model::{BacklogItem, Level};
use crate::validate::cycle::find_cycles;
use crate::validate::error::HierarchyError;
use crate::validate::{ItemIndex, push_unique};

pub(crate) fn check(index: &ItemIndex<'_>) -> Vec<HierarchyError> {
    let mut errors: Vec<HierarchyError> = index
        .duplicated_ids()
        .map(|id| HierarchyError::DuplicateId {
            item_id: id.to_string(),
        })
        .collect();

    // Edge direction: child -> parent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for id in index.ids() {
        graph.add_node(id);
    }

    for item in index.items() {
        let Some(parent_id) = item.parent_id.as_deref() else {
            if item.level != Level::Epic {
                push_unique(
                    &mut errors,
                    HierarchyError::OrphanedItem {
                        item_id: item.id.clone(),
                    },
                );
            }
            continue;
        };

        if !index.contains(parent_id) {
            push_unique(
                &mut errors,
                HierarchyError::ParentNotFound {
                    item_id: item.id.clone(),
                    missing_parent: parent_id.to_string(),
                },
            );
            continue;
        }

        graph.add_edge(item.id.as_str(), parent_id, ());

        // Self-containment is reported once, as a parent cycle.
        if parent_id == item.id {
            continue;
        }

        let parent_level = index.unambiguous_level(parent_id);
        if let Some(error) = classify_containment(item, parent_id, parent_level) {
            push_unique(&mut errors, error);
        }
    }

    for cycle_trace in find_cycles(&graph) {
        debug!(trace = ?cycle_trace, "parent cycle");
        errors.push(HierarchyError::ParentCycle { cycle_trace });
    }

    errors
}

/// Check one child → parent link against EPIC ⊃ FEATURE ⊃ STORY.
///
/// A parent whose level is ambiguous (duplicated id with conflicting levels)
/// is skipped; the duplicate is already reported.
fn classify_containment(
    item: &BacklogItem,
    parent_id: &str,
    parent_level: Option<Level>,
) -> Option<HierarchyError> {
    let parent_level = parent_level?;

    if item.level.expected_parent() == Some(parent_level) {
        return None;
    }

    if item.level != Level::Epic && parent_level.depth() < item.level.depth() {
        Some(HierarchyError::HierarchyViolation {
            item_id: item.id.clone(),
            level: item.level,
            parent_id: parent_id.to_string(),
            parent_level,
        })
    } else {
        Some(HierarchyError::InvalidLevelTransition {
            item_id: item.id.clone(),
            level: item.level,
            parent_id: parent_id.to_string(),
        })
    }
}
