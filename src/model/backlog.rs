// src/model/backlog.rs

use std::collections::BTreeMap;

use crate::model::item::{BacklogItem, ItemId};
use crate::model::node::BacklogNode;

/// Per-id adjacency, built once when the arena is created.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    /// Items that list this one in their `depends_on`.
    dependents: Vec<ItemId>,
    /// Items whose `parent_id` is this one.
    children: Vec<ItemId>,
}

/// A backlog set that has passed [`crate::validate::validate`].
///
/// This is the only input accepted by ordering and plan identity, so a set
/// with dangling references or cycles can never reach them. There is no
/// public constructor.
#[derive(Debug, Clone)]
pub struct ValidatedBacklog {
    nodes: BTreeMap<ItemId, BacklogNode>,
    adjacency: BTreeMap<ItemId, Adjacency>,
}

impl ValidatedBacklog {
    /// Build the arena from nodes whose set-wide invariants already hold.
    pub(crate) fn new_unchecked(nodes: BTreeMap<ItemId, BacklogNode>) -> Self {
        let mut adjacency: BTreeMap<ItemId, Adjacency> = nodes
            .keys()
            .map(|id| (id.clone(), Adjacency::default()))
            .collect();

        // `nodes` iterates in id order, so every adjacency list comes out sorted.
        for node in nodes.values() {
            for dep in node.depends_on() {
                if let Some(adj) = adjacency.get_mut(dep) {
                    adj.dependents.push(node.id().to_string());
                }
            }
            if let Some(parent) = node.parent_id() {
                if let Some(adj) = adjacency.get_mut(parent) {
                    adj.children.push(node.id().to_string());
                }
            }
        }

        Self { nodes, adjacency }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BacklogNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes, in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &BacklogNode> {
        self.nodes.values()
    }

    /// All ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    /// Items that depend on `id` (ascending).
    pub fn dependents_of(&self, id: &str) -> &[ItemId] {
        self.adjacency
            .get(id)
            .map(|a| a.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Items contained by `id` (ascending).
    pub fn children_of(&self, id: &str) -> &[ItemId] {
        self.adjacency
            .get(id)
            .map(|a| a.children.as_slice())
            .unwrap_or(&[])
    }

    /// Flatten back into plain records, ascending by id.
    pub fn to_items(&self) -> Vec<BacklogItem> {
        self.nodes.values().map(BacklogItem::from).collect()
    }
}
