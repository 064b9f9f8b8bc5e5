// src/validate/error.rs

//! Structural validation failures.
//!
//! Errors are split into two buckets so a caller can pick a remediation per
//! bucket: dependency errors usually need a narrow edge fix, hierarchy errors
//! usually need the whole subtree regenerated.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::{ItemId, Level};

/// Failures over the `depends_on` graph.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum DependencyError {
    #[error("item '{item_id}' depends on unknown item '{missing_target}'")]
    MissingReference {
        item_id: ItemId,
        missing_target: ItemId,
    },

    #[error("item '{item_id}' depends on itself")]
    SelfReference { item_id: ItemId },

    /// `cycle_trace` starts and ends with the lowest id on the cycle,
    /// e.g. `["S001", "S002", "S001"]`.
    #[error("dependency cycle detected: {}", .cycle_trace.join(" -> "))]
    DependencyCycleDetected { cycle_trace: Vec<ItemId> },
}

/// Failures over the `parent_id` graph and item identity.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum HierarchyError {
    #[error("id '{item_id}' appears more than once")]
    DuplicateId { item_id: ItemId },

    /// Parent sits higher in the hierarchy but skips a level
    /// (a STORY directly under an EPIC).
    #[error(
        "{level} '{item_id}' has {parent_level} parent '{parent_id}' (expected a {})",
        expected_parent_label(*.level)
    )]
    HierarchyViolation {
        item_id: ItemId,
        level: Level,
        parent_id: ItemId,
        parent_level: Level,
    },

    /// Parent can never contain this item: an EPIC with any parent, or a
    /// parent at the same or a deeper level (a STORY parenting anything, a
    /// FEATURE parenting an EPIC).
    #[error("{level} '{item_id}' cannot be contained by '{parent_id}'")]
    InvalidLevelTransition {
        item_id: ItemId,
        level: Level,
        parent_id: ItemId,
    },

    #[error("item '{item_id}' has no parent")]
    OrphanedItem { item_id: ItemId },

    #[error("item '{item_id}' references unknown parent '{missing_parent}'")]
    ParentNotFound {
        item_id: ItemId,
        missing_parent: ItemId,
    },

    #[error("parent cycle detected: {}", .cycle_trace.join(" -> "))]
    ParentCycle { cycle_trace: Vec<ItemId> },
}

fn expected_parent_label(level: Level) -> &'static str {
    match level.expected_parent() {
        Some(parent) => parent.as_str(),
        None => "no parent",
    }
}

/// Every violation found in a candidate set, bucketed.
///
/// Returned only when at least one bucket is non-empty; a set with any
/// violation is rejected as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub dependency: Vec<DependencyError>,
    pub hierarchy: Vec<HierarchyError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.dependency.is_empty() && self.hierarchy.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dependency.len() + self.hierarchy.len()
    }

    pub fn has_dependency_errors(&self) -> bool {
        !self.dependency.is_empty()
    }

    pub fn has_hierarchy_errors(&self) -> bool {
        !self.hierarchy.is_empty()
    }

    /// Any dependency-bucket cycle traces.
    pub fn dependency_cycles(&self) -> impl Iterator<Item = &[ItemId]> {
        self.dependency.iter().filter_map(|e| match e {
            DependencyError::DependencyCycleDetected { cycle_trace } => {
                Some(cycle_trace.as_slice())
            }
            _ => None,
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid backlog: {} dependency error(s), {} hierarchy error(s)",
            self.dependency.len(),
            self.hierarchy.len()
        )?;
        for e in &self.dependency {
            write!(f, "\n  [dependency] {e}")?;
        }
        for e in &self.hierarchy {
            write!(f, "\n  [hierarchy] {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
