mod common;

use std::collections::{BTreeSet, HashSet};

use backlog_compiler::model::BacklogItem;
use backlog_compiler::plan::identity;
use backlog_compiler::{order, reconcile, validate};
use common::{BacklogBuilder, ItemBuilder};
use proptest::prelude::*;

// Strategy for a valid backlog: one epic, one feature and N stories.
// Acyclic because story N only depends on stories 0..N-1.
fn backlog_strategy(max_stories: usize) -> impl Strategy<Value = Vec<BacklogItem>> {
    (1..=max_stories).prop_flat_map(|num_stories| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_stories),
            num_stories,
        );
        let priorities = proptest::collection::vec(-3i64..=3, num_stories);

        (deps_strat, priorities).prop_map(move |(raw_deps, priorities)| {
            let mut builder = BacklogBuilder::new()
                .with(ItemBuilder::epic("E001"))
                .with(ItemBuilder::feature("F001", "E001"));

            for (i, (potential_deps, priority)) in raw_deps.into_iter().zip(priorities).enumerate() {
                let mut story = ItemBuilder::story(&story_id(i), "F001").priority(priority);

                // Only allow deps < i
                let valid_deps: HashSet<usize> = if i == 0 {
                    HashSet::new()
                } else {
                    potential_deps.into_iter().map(|d| d % i).collect()
                };
                for dep in valid_deps {
                    story = story.depends_on(&story_id(dep));
                }
                builder = builder.with(story);
            }
            builder.build()
        })
    })
}

fn story_id(i: usize) -> String {
    format!("S{:03}", i + 1)
}

proptest! {
    #[test]
    fn generated_dags_always_validate(items in backlog_strategy(12)) {
        prop_assert!(validate(&items).is_ok());
    }

    #[test]
    fn waves_partition_the_set_and_respect_dependencies(items in backlog_strategy(12)) {
        let backlog = validate(&items).unwrap();
        let plan = order(&backlog);

        let placed: BTreeSet<&str> = plan.waves.iter().flatten().map(String::as_str).collect();
        let all: BTreeSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        prop_assert_eq!(placed, all);
        prop_assert_eq!(plan.ordered_backlog_ids.len(), items.len());

        for item in &items {
            let wave = plan.wave_of(&item.id).unwrap();
            for dep in &item.depends_on {
                prop_assert!(plan.wave_of(dep).unwrap() < wave);
            }
        }

        for wave in &plan.waves {
            for pair in wave.windows(2) {
                let a = backlog.get(&pair[0]).unwrap();
                let b = backlog.get(&pair[1]).unwrap();
                prop_assert!(
                    a.priority_score() > b.priority_score()
                        || (a.priority_score() == b.priority_score() && a.id() < b.id())
                );
            }
        }
    }

    #[test]
    fn input_order_never_changes_the_plan(
        (items, shuffled) in backlog_strategy(10)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
    ) {
        let a = validate(&items).unwrap();
        let b = validate(&shuffled).unwrap();

        prop_assert_eq!(identity(&a), identity(&b));
        prop_assert_eq!(order(&a), order(&b));
    }

    #[test]
    fn prose_never_changes_identity(items in backlog_strategy(8), suffix in "[a-z ]{1,12}") {
        let before = identity(&validate(&items).unwrap());

        let reworded: Vec<BacklogItem> = items
            .iter()
            .cloned()
            .map(|mut item| {
                item.title.push_str(&suffix);
                item.description = suffix.clone();
                item
            })
            .collect();

        prop_assert_eq!(before, identity(&validate(&reworded).unwrap()));
    }

    #[test]
    fn priority_changes_identity(items in backlog_strategy(8), index in any::<prop::sample::Index>()) {
        let before = identity(&validate(&items).unwrap());

        let mut bumped = items.clone();
        let target = index.index(bumped.len());
        bumped[target].priority_score += 1;

        prop_assert_ne!(before, identity(&validate(&bumped).unwrap()));
    }

    #[test]
    fn cycle_traces_are_closed_walks(
        items in backlog_strategy(8),
        pick in any::<prop::sample::Index>(),
    ) {
        let stories: Vec<String> = items
            .iter()
            .filter(|i| i.id.starts_with('S'))
            .map(|i| i.id.clone())
            .collect();
        prop_assume!(stories.len() >= 2);
        let target = stories[1 + pick.index(stories.len() - 1)].clone();

        // S001 <-> target closes at least one loop.
        let mut cyclic = items.clone();
        for item in cyclic.iter_mut() {
            if item.id == "S001" {
                item.depends_on.insert(target.clone());
            } else if item.id == target {
                item.depends_on.insert("S001".to_string());
            }
        }

        let errors = validate(&cyclic).unwrap_err();
        prop_assert!(errors.hierarchy.is_empty());

        let traces: Vec<&[String]> = errors.dependency_cycles().collect();
        prop_assert!(!traces.is_empty());
        for trace in traces {
            prop_assert!(trace.len() >= 3);
            prop_assert_eq!(trace.first(), trace.last());
            let distinct: BTreeSet<&String> = trace[..trace.len() - 1].iter().collect();
            prop_assert_eq!(distinct.len(), trace.len() - 1);
        }
    }

    #[test]
    fn self_reconcile_keeps_every_id(items in backlog_strategy(10)) {
        let report = reconcile(&items, &items);

        prop_assert!(report.is_unchanged());
        prop_assert_eq!(report.kept.len(), items.len());
    }
}
