mod common;

use backlog_compiler::order::order;
use backlog_compiler::validate::validate;
use common::{BacklogBuilder, ItemBuilder, ids, init_tracing, waves};

#[test]
fn scenario_a_epics_and_features_share_the_first_wave() {
    init_tracing();

    let items = BacklogBuilder::single_feature(&[("S001", &[]), ("S002", &["S001"])]).build();
    let backlog = validate(&items).unwrap();

    let plan = order(&backlog);
    assert_eq!(plan.waves, waves(&[&["E001", "F001", "S001"], &["S002"]]));
    assert_eq!(plan.ordered_backlog_ids, ids(&["E001", "F001", "S001", "S002"]));
}

#[test]
fn scenario_d_priority_ties_break_on_id() {
    let items = BacklogBuilder::new()
        .with(ItemBuilder::epic("E001").priority(1))
        .with(ItemBuilder::feature("F001", "E001").priority(1))
        .with(ItemBuilder::story("S010", "F001").priority(5))
        .with(ItemBuilder::story("S002", "F001").priority(5))
        .build();
    let backlog = validate(&items).unwrap();

    let plan = order(&backlog);
    assert_eq!(plan.waves, waves(&[&["S002", "S010", "E001", "F001"]]));
}

#[test]
fn higher_priority_runs_first_within_a_wave() {
    let items = BacklogBuilder::new()
        .with(ItemBuilder::epic("E001").priority(-3))
        .with(ItemBuilder::feature("F001", "E001").priority(0))
        .with(ItemBuilder::story("S001", "F001").priority(2))
        .with(ItemBuilder::story("S002", "F001").priority(9))
        .with(ItemBuilder::story("S003", "F001").priority(100).depends_on("S001"))
        .build();
    let backlog = validate(&items).unwrap();

    let plan = order(&backlog);
    assert_eq!(
        plan.waves,
        waves(&[&["S002", "S001", "F001", "E001"], &["S003"]])
    );
}

#[test]
fn diamond_dependencies_form_three_waves() {
    let items = BacklogBuilder::single_feature(&[
        ("S001", &[]),
        ("S002", &["S001"]),
        ("S003", &["S001"]),
        ("S004", &["S002", "S003"]),
    ])
    .build();
    let backlog = validate(&items).unwrap();

    let plan = order(&backlog);
    assert_eq!(
        plan.waves,
        waves(&[&["E001", "F001", "S001"], &["S002", "S003"], &["S004"]])
    );
    assert_eq!(plan.wave_of("S004"), Some(2));
    assert_eq!(plan.position_of("S004"), Some(5));
}

#[test]
fn a_child_can_run_before_its_parent() {
    // The feature waits on one of its own stories; containment is ignored.
    let items = BacklogBuilder::new()
        .with(ItemBuilder::epic("E001"))
        .with(ItemBuilder::feature("F001", "E001").depends_on("S001"))
        .with(ItemBuilder::story("S001", "F001"))
        .build();
    let backlog = validate(&items).unwrap();

    let plan = order(&backlog);
    assert_eq!(plan.waves, waves(&[&["E001", "S001"], &["F001"]]));
    assert!(plan.position_of("S001") < plan.position_of("F001"));
}

#[test]
fn lookup_maps_match_the_total_order() {
    let items = BacklogBuilder::single_feature(&[
        ("S001", &[]),
        ("S002", &["S001"]),
        ("S003", &["S002"]),
    ])
    .build();
    let backlog = validate(&items).unwrap();

    let plan = order(&backlog);
    assert_eq!(plan.len(), backlog.len());
    for (pos, id) in plan.ordered_backlog_ids.iter().enumerate() {
        assert_eq!(plan.global_index_by_id[id], pos);
        let wave = plan.wave_index_by_id[id];
        assert!(plan.waves[wave].contains(id));
    }
}

#[test]
fn input_order_does_not_change_the_plan() {
    let mut items = BacklogBuilder::single_feature(&[
        ("S004", &["S002"]),
        ("S001", &[]),
        ("S003", &["S001"]),
        ("S002", &[]),
    ])
    .build();

    let forward = order(&validate(&items).unwrap());
    items.reverse();
    let reversed = order(&validate(&items).unwrap());

    assert_eq!(forward, reversed);
}

#[test]
fn empty_backlog_has_no_waves() {
    let backlog = validate(&[]).unwrap();
    let plan = order(&backlog);
    assert!(plan.is_empty());
    assert!(plan.waves.is_empty());
}
