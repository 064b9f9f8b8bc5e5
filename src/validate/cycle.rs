// src/validate/cycle.rs

//! Deterministic cycle tracing over an id graph.
//!
//! Both the dependency graph and the parent graph go through here. Edge
//! direction is "points at": `a -> b` means `a` depends on `b`, or `a` is
//! contained by `b`, so a trace reads in the same direction as the input
//! fields.

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::model::ItemId;

/// Find one cycle per strongly connected component that contains a cycle.
///
/// Each trace starts at the lowest id (lexicographic) of its component, is a
/// shortest cycle through that id, and repeats the start at the end
/// (`[A, B, C, A]`). Neighbours are explored in ascending id order, so the
/// result does not depend on how the graph was built. Traces come back
/// sorted by their starting id.
pub(crate) fn find_cycles(graph: &DiGraphMap<&str, ()>) -> Vec<Vec<ItemId>> {
    if !is_cyclic_directed(graph) {
        return Vec::new();
    }

    let mut cycles: Vec<Vec<ItemId>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .filter_map(|scc| {
            let members: BTreeSet<&str> = scc.into_iter().collect();
            let start = *members.iter().next()?;
            shortest_cycle_through(graph, start, &members)
        })
        .collect();

    cycles.sort();
    debug!(count = cycles.len(), "traced cycles");
    cycles
}

/// Breadth-first search from `start` back to itself, staying inside `members`.
fn shortest_cycle_through(
    graph: &DiGraphMap<&str, ()>,
    start: &str,
    members: &BTreeSet<&str>,
) -> Option<Vec<ItemId>> {
    let mut came_from: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let mut next: Vec<&str> = graph
            .neighbors(current)
            .filter(|n| members.contains(n))
            .collect();
        next.sort_unstable();

        for neighbour in next {
            if neighbour == start {
                return Some(rebuild_trace(start, current, &came_from));
            }
            if !came_from.contains_key(neighbour) {
                came_from.insert(neighbour, current);
                queue.push_back(neighbour);
            }
        }
    }

    None
}

fn rebuild_trace(start: &str, last: &str, came_from: &HashMap<&str, &str>) -> Vec<ItemId> {
    let mut hops = vec![last];
    let mut cursor = last;
    while cursor != start {
        let Some(prev) = came_from.get(cursor) else {
            break;
        };
        cursor = *prev;
        hops.push(cursor);
    }
    hops.reverse();
    hops.push(start);
    hops.into_iter().map(str::to_string).collect()
}
