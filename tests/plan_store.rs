mod common;

use std::sync::Arc;

use backlog_compiler::errors::CompilerError;
use backlog_compiler::model::BacklogItem;
use backlog_compiler::plan::{
    ExecutionPlan, FilePlanStore, MemoryPlanStore, PlanStore, get_or_create_plan,
};
use backlog_compiler::validate::validate;
use backlog_compiler_test_utils::run_concurrently;
use common::{BacklogBuilder, init_tracing};

fn sample() -> Vec<BacklogItem> {
    BacklogBuilder::single_feature(&[("S001", &[]), ("S002", &["S001"]), ("S003", &["S001"])])
        .build()
}

fn sample_plan() -> ExecutionPlan {
    ExecutionPlan::compute(&validate(&sample()).unwrap())
}

#[test]
fn file_store_round_trips_plans() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let store = FilePlanStore::new(dir.path().join("plans"));
    let plan = sample_plan();

    assert!(store.get(plan.backlog_hash()).unwrap().is_none());
    assert!(store.hashes().unwrap().is_empty());

    let (stored, created) = store.insert_if_absent(plan.clone()).unwrap();
    assert!(created);
    assert_eq!(*stored, plan);

    let loaded = store.get(plan.backlog_hash()).unwrap().unwrap();
    assert_eq!(*loaded, plan);
    assert_eq!(store.hashes().unwrap(), vec![plan.backlog_hash().to_string()]);
}

#[test]
fn file_store_never_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let plan = sample_plan();

    let first = FilePlanStore::new(dir.path());
    first.insert_if_absent(plan.clone()).unwrap();

    // A second store over the same directory sees the existing plan.
    let second = FilePlanStore::new(dir.path());
    let (stored, created) = second.insert_if_absent(plan.clone()).unwrap();
    assert!(!created);
    assert_eq!(*stored, plan);
}

#[test]
fn file_store_rejects_non_hash_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilePlanStore::new(dir.path());

    match store.get("../../etc/passwd") {
        Err(CompilerError::PlanStore(msg)) => assert!(msg.contains("not a backlog hash")),
        other => panic!("Expected PlanStore error, got: {:?}", other),
    }
}

#[test]
fn file_store_ignores_unrelated_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("draft.json"), "{}").unwrap();

    let store = FilePlanStore::new(dir.path());
    assert!(store.hashes().unwrap().is_empty());
}

#[test]
fn concurrent_callers_share_one_memory_plan() {
    let store = Arc::new(MemoryPlanStore::new());
    let backlog = validate(&sample()).unwrap();

    let results = {
        let store = Arc::clone(&store);
        run_concurrently(8, move || get_or_create_plan(&store, &backlog).unwrap())
    };

    assert_eq!(results.iter().filter(|r| r.created).count(), 1);
    let first = &results[0].plan;
    assert!(results.iter().all(|r| Arc::ptr_eq(&r.plan, first)));
    assert_eq!(store.len(), 1);
}

#[test]
fn concurrent_callers_share_one_file_plan() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FilePlanStore::new(dir.path()));
    let backlog = validate(&sample()).unwrap();
    let expected = ExecutionPlan::compute(&backlog);

    let results = {
        let store = Arc::clone(&store);
        run_concurrently(8, move || get_or_create_plan(&store, &backlog).unwrap())
    };

    assert_eq!(results.iter().filter(|r| r.created).count(), 1);
    assert!(results.iter().all(|r| *r.plan == expected));
    assert_eq!(store.hashes().unwrap().len(), 1);
}
