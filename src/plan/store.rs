// src/plan/store.rs

//! Storage for execution plans, keyed by backlog hash.
//!
//! Plans are immutable, so the only write is "insert if absent": when two
//! callers race on the same hash, both computed the same plan and the first
//! one stored wins. Nothing is ever overwritten.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::{CompilerError, Result};
use crate::plan::ExecutionPlan;
use crate::plan::identity::{BacklogHash, is_backlog_hash};

/// Key-value storage `backlog_hash -> ExecutionPlan`.
///
/// Implementations must be safe to share across threads; callers may look
/// up and insert concurrently.
pub trait PlanStore: Send + Sync {
    /// Look up the plan stored under `hash`.
    fn get(&self, hash: &str) -> Result<Option<Arc<ExecutionPlan>>>;

    /// Store `plan` unless a plan with the same hash already exists.
    ///
    /// Returns the plan now stored under that hash and whether this call
    /// created it. An existing plan is returned unchanged.
    fn insert_if_absent(&self, plan: ExecutionPlan) -> Result<(Arc<ExecutionPlan>, bool)>;

    /// All stored hashes, ascending.
    fn hashes(&self) -> Result<Vec<BacklogHash>>;
}

impl<T: PlanStore + ?Sized> PlanStore for Box<T> {
    fn get(&self, hash: &str) -> Result<Option<Arc<ExecutionPlan>>> {
        (**self).get(hash)
    }

    fn insert_if_absent(&self, plan: ExecutionPlan) -> Result<(Arc<ExecutionPlan>, bool)> {
        (**self).insert_if_absent(plan)
    }

    fn hashes(&self) -> Result<Vec<BacklogHash>> {
        (**self).hashes()
    }
}

impl<T: PlanStore + ?Sized> PlanStore for Arc<T> {
    fn get(&self, hash: &str) -> Result<Option<Arc<ExecutionPlan>>> {
        (**self).get(hash)
    }

    fn insert_if_absent(&self, plan: ExecutionPlan) -> Result<(Arc<ExecutionPlan>, bool)> {
        (**self).insert_if_absent(plan)
    }

    fn hashes(&self) -> Result<Vec<BacklogHash>> {
        (**self).hashes()
    }
}

/// Stores plans in memory only (lost on restart).
///
/// Lookups for the same hash hand out the same `Arc`, so structurally
/// identical backlogs resolve to literally the same plan object.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    plans: RwLock<HashMap<BacklogHash, Arc<ExecutionPlan>>>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plans.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> CompilerError {
    CompilerError::PlanStore("in-memory plan store lock poisoned".to_string())
}

impl PlanStore for MemoryPlanStore {
    fn get(&self, hash: &str) -> Result<Option<Arc<ExecutionPlan>>> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        Ok(plans.get(hash).cloned())
    }

    fn insert_if_absent(&self, plan: ExecutionPlan) -> Result<(Arc<ExecutionPlan>, bool)> {
        let mut plans = self.plans.write().map_err(|_| poisoned())?;

        if let Some(existing) = plans.get(plan.backlog_hash()) {
            debug!(hash = %plan.backlog_hash(), "plan already stored (memory)");
            return Ok((Arc::clone(existing), false));
        }

        let hash = plan.backlog_hash().to_string();
        let stored = Arc::new(plan);
        plans.insert(hash.clone(), Arc::clone(&stored));
        info!(hash = %hash, "stored execution plan (memory)");
        Ok((stored, true))
    }

    fn hashes(&self) -> Result<Vec<BacklogHash>> {
        let plans = self.plans.read().map_err(|_| poisoned())?;
        let mut hashes: Vec<BacklogHash> = plans.keys().cloned().collect();
        hashes.sort();
        Ok(hashes)
    }
}

/// Stores one JSON document per plan at `<dir>/<hash>.json`.
///
/// Writes go through a temp file in the same directory and are persisted
/// without clobbering, so a concurrent writer for the same hash can only
/// ever lose the race, never corrupt the stored plan.
#[derive(Debug, Clone)]
pub struct FilePlanStore {
    dir: PathBuf,
}

impl FilePlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn plan_path(&self, hash: &str) -> Result<PathBuf> {
        if !is_backlog_hash(hash) {
            return Err(CompilerError::PlanStore(format!(
                "not a backlog hash: '{hash}'"
            )));
        }
        Ok(self.dir.join(format!("{hash}.json")))
    }

    fn read_plan(&self, path: &Path, hash: &str) -> Result<ExecutionPlan> {
        let contents = fs::read_to_string(path)?;
        let plan: ExecutionPlan = serde_json::from_str(&contents)?;
        if plan.backlog_hash() != hash {
            return Err(CompilerError::PlanStore(format!(
                "plan file {:?} holds hash '{}'",
                path,
                plan.backlog_hash()
            )));
        }
        Ok(plan)
    }
}

impl PlanStore for FilePlanStore {
    fn get(&self, hash: &str) -> Result<Option<Arc<ExecutionPlan>>> {
        let path = self.plan_path(hash)?;
        if !path.exists() {
            return Ok(None);
        }
        let plan = self.read_plan(&path, hash)?;
        Ok(Some(Arc::new(plan)))
    }

    fn insert_if_absent(&self, plan: ExecutionPlan) -> Result<(Arc<ExecutionPlan>, bool)> {
        let hash = plan.backlog_hash().to_string();
        let path = self.plan_path(&hash)?;

        if path.exists() {
            debug!(hash = %hash, "plan already stored (file)");
            let existing = self.read_plan(&path, &hash)?;
            return Ok((Arc::new(existing), false));
        }

        fs::create_dir_all(&self.dir)?;

        let tmp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, &plan)?;
            writer.flush()?;
        }

        match tmp.persist_noclobber(&path) {
            Ok(_) => {
                info!(hash = %hash, path = ?path, "stored execution plan (file)");
                Ok((Arc::new(plan), true))
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!(hash = %hash, "lost plan write race; using stored plan");
                let existing = self.read_plan(&path, &hash)?;
                Ok((Arc::new(existing), false))
            }
            Err(e) => Err(CompilerError::IoError(e.error)),
        }
    }

    fn hashes(&self) -> Result<Vec<BacklogHash>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut hashes = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_backlog_hash(stem) {
                    hashes.push(stem.to_string());
                }
            }
        }
        hashes.sort();
        Ok(hashes)
    }
}
