// src/model/node.rs

//! Level-tagged item representation.
//!
//! Each variant carries only the fields legal for its level: epics have no
//! parent, features always hang off an epic, stories always hang off a
//! feature. Whether the referenced parent actually *has* that level is a
//! set-wide property and is checked by the validator before any node is
//! constructed.

use std::collections::BTreeSet;

use crate::model::item::{BacklogItem, ItemId, Level};
use crate::validate::HierarchyError;

/// Fields shared by every level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBody {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub priority_score: i64,
    pub depends_on: BTreeSet<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacklogNode {
    Epic(ItemBody),
    Feature { body: ItemBody, epic_id: ItemId },
    Story { body: ItemBody, feature_id: ItemId },
}

impl BacklogNode {
    pub fn body(&self) -> &ItemBody {
        match self {
            BacklogNode::Epic(body) => body,
            BacklogNode::Feature { body, .. } => body,
            BacklogNode::Story { body, .. } => body,
        }
    }

    pub fn id(&self) -> &str {
        &self.body().id
    }

    pub fn level(&self) -> Level {
        match self {
            BacklogNode::Epic(_) => Level::Epic,
            BacklogNode::Feature { .. } => Level::Feature,
            BacklogNode::Story { .. } => Level::Story,
        }
    }

    pub fn priority_score(&self) -> i64 {
        self.body().priority_score
    }

    pub fn depends_on(&self) -> &BTreeSet<ItemId> {
        &self.body().depends_on
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            BacklogNode::Epic(_) => None,
            BacklogNode::Feature { epic_id, .. } => Some(epic_id),
            BacklogNode::Story { feature_id, .. } => Some(feature_id),
        }
    }
}

impl TryFrom<BacklogItem> for BacklogNode {
    type Error = HierarchyError;

    /// Reshape a flat record into its level-tagged form.
    ///
    /// Only the per-item shape is checked here (an epic must not have a
    /// parent, features and stories must have one).
    fn try_from(item: BacklogItem) -> Result<Self, Self::Error> {
        let BacklogItem {
            id,
            level,
            title,
            description,
            priority_score,
            depends_on,
            parent_id,
        } = item;

        let body = ItemBody {
            id,
            title,
            description,
            priority_score,
            depends_on,
        };

        match (level, parent_id) {
            (Level::Epic, None) => Ok(BacklogNode::Epic(body)),
            (Level::Epic, Some(parent_id)) => Err(HierarchyError::InvalidLevelTransition {
                item_id: body.id,
                level,
                parent_id,
            }),
            (Level::Feature, Some(epic_id)) => Ok(BacklogNode::Feature { body, epic_id }),
            (Level::Story, Some(feature_id)) => Ok(BacklogNode::Story { body, feature_id }),
            (Level::Feature | Level::Story, None) => {
                Err(HierarchyError::OrphanedItem { item_id: body.id })
            }
        }
    }
}

impl From<&BacklogNode> for BacklogItem {
    fn from(node: &BacklogNode) -> Self {
        let body = node.body();
        BacklogItem {
            id: body.id.clone(),
            level: node.level(),
            title: body.title.clone(),
            description: body.description.clone(),
            priority_score: body.priority_score,
            depends_on: body.depends_on.clone(),
            parent_id: node.parent_id().map(str::to_string),
        }
    }
}
