mod common;

use std::sync::Arc;

use backlog_compiler::errors::CompilerError;
use backlog_compiler::model::BacklogItem;
use backlog_compiler::plan::identity::is_backlog_hash;
use backlog_compiler::plan::{
    BacklogCompiler, ExecutionPlan, MemoryPlanStore, PlanStore, canonical_json,
    get_or_create_plan, identity,
};
use backlog_compiler::validate::validate;
use common::{BacklogBuilder, ItemBuilder, init_tracing, waves};

fn sample() -> Vec<BacklogItem> {
    BacklogBuilder::single_feature(&[("S001", &[]), ("S002", &["S001"])]).build()
}

fn hash_of(items: &[BacklogItem]) -> String {
    identity(&validate(items).unwrap())
}

#[test]
fn canonical_json_has_sorted_keys_and_integer_scores() {
    let items = BacklogBuilder::new()
        .with(ItemBuilder::feature("F001", "E001").priority(-1).depends_on("E001"))
        .with(ItemBuilder::epic("E001").priority(3).description("prose"))
        .build();
    let backlog = validate(&items).unwrap();

    assert_eq!(
        canonical_json(&backlog),
        r#"[{"depends_on":[],"id":"E001","level":"EPIC","parent_id":null,"priority_score":3},{"depends_on":["E001"],"id":"F001","level":"FEATURE","parent_id":"E001","priority_score":-1}]"#
    );
    assert_eq!(
        identity(&backlog),
        "3ce067d4067f070300e2e867ecb945eee3938a08c14d2146f77c23fba5057995"
    );
}

#[test]
fn canonical_keys_are_emitted_in_ascending_order_for_every_item() {
    let backlog = validate(&sample()).unwrap();
    let canonical = canonical_json(&backlog);

    let keys = ["depends_on", "id", "level", "parent_id", "priority_score"];
    let objects: Vec<&str> = canonical
        .trim_start_matches("[{")
        .trim_end_matches("}]")
        .split("},{")
        .collect();
    assert_eq!(objects.len(), 4);

    for object in objects {
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| {
                object
                    .find(&format!("\"{k}\":"))
                    .unwrap_or_else(|| panic!("missing key {k} in {object}"))
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "keys out of order in {object}"
        );
    }
}

#[test]
fn hash_is_lowercase_hex_sha256() {
    let hash = hash_of(&sample());
    assert!(is_backlog_hash(&hash), "unexpected hash format: {hash}");
}

#[test]
fn prose_edits_do_not_change_the_hash() {
    let base = hash_of(&sample());

    let mut edited = sample();
    for item in &mut edited {
        item.title = format!("rewritten {}", item.title);
        item.description = "a completely different description".to_string();
    }

    assert_eq!(hash_of(&edited), base);
}

#[test]
fn structural_edits_change_the_hash() {
    let base = hash_of(&sample());

    let mut priority = sample();
    priority[2].priority_score = 7;
    assert_ne!(hash_of(&priority), base);

    let mut dependency = sample();
    dependency[3].depends_on.clear();
    assert_ne!(hash_of(&dependency), base);

    let mut hierarchy = sample();
    hierarchy.push(ItemBuilder::feature("F002", "E001").build());
    hierarchy[3].parent_id = Some("F002".to_string());
    assert_ne!(hash_of(&hierarchy), base);
}

#[test]
fn hash_does_not_depend_on_input_order() {
    let mut items = sample();
    let forward = hash_of(&items);
    items.reverse();
    assert_eq!(hash_of(&items), forward);
}

#[test]
fn same_structure_resolves_to_the_same_plan_object() {
    init_tracing();

    let store = MemoryPlanStore::new();
    let first = get_or_create_plan(&store, &validate(&sample()).unwrap()).unwrap();
    assert!(first.created);

    let mut reworded = sample();
    reworded[0].title = "Epic, renamed by a different model".to_string();
    let second = get_or_create_plan(&store, &validate(&reworded).unwrap()).unwrap();

    assert!(!second.created);
    assert!(Arc::ptr_eq(&first.plan, &second.plan));
    assert_eq!(store.len(), 1);
}

#[test]
fn structural_change_creates_a_new_plan_and_keeps_the_old_one() {
    let store = MemoryPlanStore::new();
    let original = get_or_create_plan(&store, &validate(&sample()).unwrap()).unwrap();
    let snapshot: ExecutionPlan = (*original.plan).clone();

    let mut changed = sample();
    changed[3].depends_on.clear();
    let updated = get_or_create_plan(&store, &validate(&changed).unwrap()).unwrap();

    assert!(updated.created);
    assert_ne!(updated.plan.backlog_hash(), original.plan.backlog_hash());
    assert_eq!(updated.plan.waves(), waves(&[&["E001", "F001", "S001", "S002"]]).as_slice());

    let stored_original = store.get(original.plan.backlog_hash()).unwrap().unwrap();
    assert_eq!(*stored_original, snapshot);
    assert_eq!(store.hashes().unwrap().len(), 2);
}

#[test]
fn plan_carries_hash_and_order() {
    let backlog = validate(&sample()).unwrap();
    let plan = ExecutionPlan::compute(&backlog);

    assert_eq!(plan.backlog_hash(), identity(&backlog));
    assert_eq!(plan.waves(), waves(&[&["E001", "F001", "S001"], &["S002"]]).as_slice());
    assert_eq!(plan.wave_of("S002"), Some(1));
    assert_eq!(plan.position_of("S002"), Some(3));
    assert_eq!(plan.global_index_by_id().len(), 4);
    assert_eq!(plan.wave_index_by_id().len(), 4);
}

#[test]
fn compiler_rejects_invalid_sets_without_storing() {
    let compiler = BacklogCompiler::new(MemoryPlanStore::new());
    let items = BacklogBuilder::single_feature(&[("S001", &["S002"]), ("S002", &["S001"])]).build();

    match compiler.compile(&items) {
        Err(CompilerError::InvalidBacklog(errors)) => {
            assert_eq!(errors.dependency_cycles().count(), 1);
        }
        Err(e) => panic!("Expected InvalidBacklog, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    assert!(compiler.store().is_empty());
}

#[test]
fn compiler_memoizes_across_calls() {
    let compiler = BacklogCompiler::new(MemoryPlanStore::new());

    let first = compiler.compile(&sample()).unwrap();
    let second = compiler.compile(&sample()).unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert!(Arc::ptr_eq(&first.plan, &second.plan));
}
