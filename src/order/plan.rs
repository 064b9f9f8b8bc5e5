// src/order/plan.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ItemId;

/// Output of the ordering engine.
///
/// `ordered_backlog_ids` is authoritative; `waves` is the parallelism view
/// over the same ids (concatenating the waves gives the total order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedPlan {
    pub ordered_backlog_ids: Vec<ItemId>,
    pub waves: Vec<Vec<ItemId>>,
    pub wave_index_by_id: BTreeMap<ItemId, usize>,
    pub global_index_by_id: BTreeMap<ItemId, usize>,
}

impl OrderedPlan {
    /// Derive the total order and lookup maps from already-sorted waves.
    pub fn from_waves(waves: Vec<Vec<ItemId>>) -> Self {
        let mut ordered_backlog_ids = Vec::new();
        let mut wave_index_by_id = BTreeMap::new();
        let mut global_index_by_id = BTreeMap::new();

        for (wave_idx, wave) in waves.iter().enumerate() {
            for id in wave {
                wave_index_by_id.insert(id.clone(), wave_idx);
                global_index_by_id.insert(id.clone(), ordered_backlog_ids.len());
                ordered_backlog_ids.push(id.clone());
            }
        }

        Self {
            ordered_backlog_ids,
            waves,
            wave_index_by_id,
            global_index_by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.ordered_backlog_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_backlog_ids.is_empty()
    }

    pub fn wave_of(&self, id: &str) -> Option<usize> {
        self.wave_index_by_id.get(id).copied()
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.global_index_by_id.get(id).copied()
    }
}
