// src/plan/mod.rs

//! Plan identity and memoization.
//!
//! - [`identity`] computes the content hash of a validated backlog.
//! - [`store`] holds immutable [`ExecutionPlan`]s keyed by that hash.
//! - [`compiler`] ties validation, ordering and storage together.

pub mod compiler;
pub mod identity;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ItemId, ValidatedBacklog};
use crate::order::{OrderedPlan, order};

pub use compiler::{BacklogCompiler, StoredPlan, get_or_create_plan};
pub use identity::{BacklogHash, canonical_json, identity};
pub use store::{FilePlanStore, MemoryPlanStore, PlanStore};

/// Execution plan derived from one validated backlog.
///
/// Never hand-authored and never mutated: fields are private and there is no
/// way to change a plan after [`ExecutionPlan::compute`]. A structurally
/// different backlog hashes differently and gets its own plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    backlog_hash: BacklogHash,
    ordered_backlog_ids: Vec<ItemId>,
    waves: Vec<Vec<ItemId>>,
    wave_index_by_id: BTreeMap<ItemId, usize>,
    global_index_by_id: BTreeMap<ItemId, usize>,
}

impl ExecutionPlan {
    /// Hash and order `backlog`.
    pub fn compute(backlog: &ValidatedBacklog) -> Self {
        Self::from_parts(identity(backlog), order(backlog))
    }

    pub(crate) fn from_parts(backlog_hash: BacklogHash, ordered: OrderedPlan) -> Self {
        let OrderedPlan {
            ordered_backlog_ids,
            waves,
            wave_index_by_id,
            global_index_by_id,
        } = ordered;

        Self {
            backlog_hash,
            ordered_backlog_ids,
            waves,
            wave_index_by_id,
            global_index_by_id,
        }
    }

    pub fn backlog_hash(&self) -> &str {
        &self.backlog_hash
    }

    /// Authoritative total order.
    pub fn ordered_backlog_ids(&self) -> &[ItemId] {
        &self.ordered_backlog_ids
    }

    pub fn waves(&self) -> &[Vec<ItemId>] {
        &self.waves
    }

    pub fn wave_index_by_id(&self) -> &BTreeMap<ItemId, usize> {
        &self.wave_index_by_id
    }

    pub fn global_index_by_id(&self) -> &BTreeMap<ItemId, usize> {
        &self.global_index_by_id
    }

    pub fn wave_of(&self, id: &str) -> Option<usize> {
        self.wave_index_by_id.get(id).copied()
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.global_index_by_id.get(id).copied()
    }
}
