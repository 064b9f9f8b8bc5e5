// src/plan/compiler.rs

//! The backlog compiler: validate → hash → memoized plan.

use std::sync::Arc;

use tracing::info;

use crate::errors::{CompilerError, Result};
use crate::model::{BacklogItem, ValidatedBacklog};
use crate::plan::ExecutionPlan;
use crate::plan::identity::identity;
use crate::plan::store::PlanStore;
use crate::validate::validate;

/// A plan handed back by [`get_or_create_plan`].
#[derive(Debug, Clone)]
pub struct StoredPlan {
    pub plan: Arc<ExecutionPlan>,
    /// `true` if this call computed and stored the plan, `false` if an
    /// existing plan for the same hash was returned.
    pub created: bool,
}

/// Return the stored plan for `backlog`, computing and storing it on a miss.
///
/// Compute-then-insert-if-absent: a concurrent caller that stores first
/// wins, and this call returns that plan instead of its own copy.
pub fn get_or_create_plan<S>(store: &S, backlog: &ValidatedBacklog) -> Result<StoredPlan>
where
    S: PlanStore + ?Sized,
{
    let hash = identity(backlog);

    if let Some(plan) = store.get(&hash)? {
        info!(hash = %hash, "plan cache hit");
        return Ok(StoredPlan {
            plan,
            created: false,
        });
    }

    info!(hash = %hash, items = backlog.len(), "plan cache miss; ordering backlog");
    let (plan, created) = store.insert_if_absent(ExecutionPlan::compute(backlog))?;
    Ok(StoredPlan { plan, created })
}

/// Validation, hashing and plan memoization over an injected [`PlanStore`].
#[derive(Debug)]
pub struct BacklogCompiler<S> {
    store: S,
}

impl<S: PlanStore> BacklogCompiler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_or_create_plan(&self, backlog: &ValidatedBacklog) -> Result<StoredPlan> {
        get_or_create_plan(&self.store, backlog)
    }

    /// Validate `items` and return their plan.
    ///
    /// Any validation failure rejects the whole set with
    /// [`CompilerError::InvalidBacklog`]; nothing is stored.
    pub fn compile(&self, items: &[BacklogItem]) -> Result<StoredPlan> {
        let backlog = validate(items).map_err(CompilerError::InvalidBacklog)?;
        self.get_or_create_plan(&backlog)
    }
}
