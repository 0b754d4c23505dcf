use super::DependencyGraph;
use std::collections::HashSet;

/// Give every nested entity the group of its outermost grouped container.
///
/// Classes are usually put in a Doxygen group at the outer level only; their
/// nested classes belong in the same cluster. Returns the number of entities
/// whose group changed. Running it a second time changes nothing.
pub fn propagate_groups(graph: &mut DependencyGraph) -> usize {
    let snapshot: &DependencyGraph = graph;
    let assignments: Vec<(String, String)> = snapshot
        .nesting
        .iter()
        .filter_map(|(inner, outer)| {
            outermost_group(snapshot, outer).map(|group| (inner.clone(), group.to_string()))
        })
        .collect();

    let mut changed = 0;
    for (inner, group) in assignments {
        if graph.group_of(&inner) != Some(group.as_str()) {
            graph.record_group_member(&inner, &group);
            changed += 1;
        }
    }
    changed
}

/// Group of the outermost entity, starting at `key` and walking up the nesting
/// relation, that belongs to a group. `None` if no entity on the way has one.
#[must_use]
pub fn outermost_group<'a>(graph: &'a DependencyGraph, key: &'a str) -> Option<&'a str> {
    let mut found = None;
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = Some(key);
    while let Some(k) = current {
        if !visited.insert(k) {
            break;
        }
        if let Some(group) = graph.group_of(k) {
            found = Some(group);
        }
        current = graph.enclosing(k);
    }
    found
}
