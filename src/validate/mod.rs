// src/validate/mod.rs

//! Graph validation for candidate backlog sets.
//!
//! [`validate`] checks two independent buckets over the same set:
//! - [`dependency`]: `depends_on` references and cycles,
//! - [`hierarchy`]: id uniqueness, containment rules and `parent_id` cycles.
//!
//! Every violation in both buckets is collected before returning; nothing is
//! repaired. A set with any violation is rejected in full.

pub mod dependency;
pub mod error;
pub mod hierarchy;
pub mod lint;

mod cycle;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::{BacklogItem, BacklogNode, ItemId, Level, ValidatedBacklog};

pub use error::{DependencyError, HierarchyError, ValidationErrors};
pub use lint::{Advisory, id_convention_advisories};

/// Outcome of [`validate`]: the arena, or every violation found.
pub type ValidationResult = std::result::Result<ValidatedBacklog, ValidationErrors>;

/// Validate a candidate set and, if it is structurally sound, turn it into a
/// [`ValidatedBacklog`].
///
/// Input order is irrelevant: items are processed in a canonical order so
/// the error list is identical for any permutation of `items`.
pub fn validate(items: &[BacklogItem]) -> ValidationResult {
    let index = ItemIndex::build(items);

    let errors = ValidationErrors {
        dependency: dependency::check(&index),
        hierarchy: hierarchy::check(&index),
    };

    if !errors.is_empty() {
        warn!(
            items = items.len(),
            dependency_errors = errors.dependency.len(),
            hierarchy_errors = errors.hierarchy.len(),
            "backlog rejected"
        );
        return Err(errors);
    }

    let mut nodes: BTreeMap<ItemId, BacklogNode> = BTreeMap::new();
    let mut shape_errors = Vec::new();
    for item in index.items() {
        match BacklogNode::try_from((*item).clone()) {
            Ok(node) => {
                nodes.insert(node.id().to_string(), node);
            }
            Err(e) => shape_errors.push(e),
        }
    }

    if !shape_errors.is_empty() {
        return Err(ValidationErrors {
            dependency: Vec::new(),
            hierarchy: shape_errors,
        });
    }

    debug!(items = nodes.len(), "backlog validated");
    Ok(ValidatedBacklog::new_unchecked(nodes))
}

/// Read-only lookup over a candidate set, built once per validation call.
///
/// Duplicate ids are kept (every occurrence is checked) so that reporting
/// does not depend on which copy came first.
pub(crate) struct ItemIndex<'a> {
    /// All items in canonical (fully sorted) order.
    items: Vec<&'a BacklogItem>,
    occurrences: BTreeMap<&'a str, Vec<&'a BacklogItem>>,
}

impl<'a> ItemIndex<'a> {
    pub(crate) fn build(items: &'a [BacklogItem]) -> Self {
        let mut sorted: Vec<&BacklogItem> = items.iter().collect();
        sorted.sort();

        let mut occurrences: BTreeMap<&str, Vec<&BacklogItem>> = BTreeMap::new();
        for item in &sorted {
            occurrences.entry(item.id.as_str()).or_default().push(item);
        }

        Self {
            items: sorted,
            occurrences,
        }
    }

    pub(crate) fn items(&self) -> &[&'a BacklogItem] {
        &self.items
    }

    /// Distinct ids, ascending.
    pub(crate) fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.occurrences.keys().copied()
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.occurrences.contains_key(id)
    }

    /// Ids that occur more than once, ascending.
    pub(crate) fn duplicated_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.occurrences
            .iter()
            .filter(|(_, items)| items.len() > 1)
            .map(|(id, _)| *id)
    }

    /// The level of `id`, if it exists and all of its occurrences agree.
    pub(crate) fn unambiguous_level(&self, id: &str) -> Option<Level> {
        let items = self.occurrences.get(id)?;
        let first = items.first()?.level;
        items.iter().all(|i| i.level == first).then_some(first)
    }
}

/// Push `error` unless an identical one is already recorded (identical
/// duplicate items would otherwise report twice).
pub(crate) fn push_unique<E: PartialEq>(errors: &mut Vec<E>, error: E) {
    if !errors.contains(&error) {
        errors.push(error);
    }
}
