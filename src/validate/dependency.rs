// src/validate/dependency.rs

//! Dependency bucket: checks over `depends_on` edges only.

use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::validate::cycle::find_cycles;
use crate::validate::error::DependencyError;
use crate::validate::{ItemIndex, push_unique};

pub(crate) fn check(index: &ItemIndex<'_>) -> Vec<DependencyError> {
    let mut errors = Vec::new();

    // Edge direction: item -> dependency, so traces read like `depends_on`.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for id in index.ids() {
        graph.add_node(id);
    }

    for item in index.items() {
        for dep in &item.depends_on {
            if *dep == item.id {
                push_unique(
                    &mut errors,
                    DependencyError::SelfReference {
                        item_id: item.id.clone(),
                    },
                );
            } else if !index.contains(dep) {
                push_unique(
                    &mut errors,
                    DependencyError::MissingReference {
                        item_id: item.id.clone(),
                        missing_target: dep.clone(),
                    },
                );
            } else {
                graph.add_edge(item.id.as_str(), dep.as_str(), ());
            }
        }
    }

    for cycle_trace in find_cycles(&graph) {
        debug!(trace = ?cycle_trace, "dependency cycle");
        errors.push(DependencyError::DependencyCycleDetected { cycle_trace });
    }

    errors
}
