// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod input;
pub mod logging;
pub mod model;
pub mod order;
pub mod plan;
pub mod reconcile;
pub mod types;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::loader::load_or_default;
use crate::config::model::ConfigFile;
use crate::errors::CompilerError;
use crate::input::load_backlog;
use crate::types::PlanStorageMode;
use crate::validate::Advisory;

pub use crate::model::{BacklogItem, BacklogNode, ItemId, Level, ValidatedBacklog};
pub use crate::order::{OrderedPlan, order};
pub use crate::plan::{
    BacklogCompiler, BacklogHash, ExecutionPlan, FilePlanStore, MemoryPlanStore, PlanStore,
    StoredPlan, get_or_create_plan, identity,
};
pub use crate::reconcile::{ReconciliationReport, reconcile, sibling_set};
pub use crate::validate::{ValidationErrors, ValidationResult, validate};

/// High-level entry point used by `main.rs`.
///
/// Every subcommand writes a single JSON document to stdout. Invalid
/// backlogs still print their error report before returning an error, so
/// callers get both the report and a non-zero exit status.
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref()).context("loading config")?;
    debug!(?cfg, "configuration loaded");

    match args.command {
        Command::Validate { file } => run_validate(&cfg, &file),
        Command::Hash { file } => run_hash(&file),
        Command::Plan { file } => run_plan(&cfg, &file),
        Command::Reconcile {
            existing,
            candidate,
            parent,
        } => run_reconcile(&existing, &candidate, parent.as_deref()),
        Command::Plans => run_list_plans(&cfg),
    }
}

/// Build the plan store selected by `[config].plan_storage`.
pub fn open_store(cfg: &ConfigFile) -> Box<dyn PlanStore> {
    match cfg.config.plan_storage {
        PlanStorageMode::File => Box::new(FilePlanStore::new(cfg.config.plan_dir.clone())),
        PlanStorageMode::Memory => Box::new(MemoryPlanStore::new()),
    }
}

#[derive(Serialize)]
struct ValidateOutput<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
    advisories: &'a [Advisory],
}

#[derive(Serialize)]
struct HashOutput<'a> {
    backlog_hash: &'a str,
}

fn run_validate(cfg: &ConfigFile, file: &Path) -> Result<()> {
    let items = read_backlog(file)?;

    let advisories = if cfg.lint.id_convention {
        validate::id_convention_advisories(&items)
    } else {
        Vec::new()
    };

    match validate(&items) {
        Ok(backlog) => {
            info!(items = backlog.len(), "backlog is valid");
            print_json(&ValidateOutput {
                valid: true,
                errors: None,
                advisories: &advisories,
            })
        }
        Err(errors) => {
            print_json(&ValidateOutput {
                valid: false,
                errors: Some(&errors),
                advisories: &advisories,
            })?;
            Err(CompilerError::InvalidBacklog(errors).into())
        }
    }
}

fn run_hash(file: &Path) -> Result<()> {
    let backlog = read_valid_backlog(file)?;
    let hash = identity(&backlog);
    print_json(&HashOutput {
        backlog_hash: &hash,
    })
}

fn run_plan(cfg: &ConfigFile, file: &Path) -> Result<()> {
    let backlog = read_valid_backlog(file)?;
    let compiler = BacklogCompiler::new(open_store(cfg));
    let stored = compiler.get_or_create_plan(&backlog)?;

    info!(
        hash = %stored.plan.backlog_hash(),
        created = stored.created,
        waves = stored.plan.waves().len(),
        "execution plan ready"
    );
    print_json(stored.plan.as_ref())
}

fn run_reconcile(existing: &Path, candidate: &Path, parent: Option<&str>) -> Result<()> {
    let existing_items = read_backlog(existing)?;
    let candidate_items = read_backlog(candidate)?;

    let report = match parent {
        Some(parent_id) => reconcile(
            sibling_set(&existing_items, Some(parent_id)),
            sibling_set(&candidate_items, Some(parent_id)),
        ),
        None => reconcile(&existing_items, &candidate_items),
    };

    print_json(&report)
}

fn run_list_plans(cfg: &ConfigFile) -> Result<()> {
    let store = open_store(cfg);
    let hashes = store.hashes()?;
    print_json(&hashes)
}

fn read_backlog(file: &Path) -> Result<Vec<BacklogItem>> {
    load_backlog(file).with_context(|| format!("reading backlog {:?}", file))
}

/// Read and validate; on failure print the error report as JSON first.
fn read_valid_backlog(file: &Path) -> Result<ValidatedBacklog> {
    let items = read_backlog(file)?;
    match validate(&items) {
        Ok(backlog) => Ok(backlog),
        Err(errors) => {
            print_json(&ValidateOutput {
                valid: false,
                errors: Some(&errors),
                advisories: &[],
            })?;
            Err(CompilerError::InvalidBacklog(errors).into())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
