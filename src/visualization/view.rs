//! Render-ready snapshot of a dependency graph.
use crate::graph::{DependencyGraph, NamespaceScope};
use std::collections::BTreeSet;

/// A class, struct or interface node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    /// Short name shown in the graph.
    pub label: String,
    /// Full name, used as the target of a Doxygen `\ref` link.
    pub url_ref: String,
}

/// A Doxygen group, drawn as a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCluster {
    pub label: String,
    pub members: Vec<ClassNode>,
}

/// All dependencies of one class, by short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyList {
    pub label: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphView {
    pub groups: Vec<GroupCluster>,
    pub ungrouped: Vec<ClassNode>,
    pub dependencies: Vec<DependencyList>,
}

impl GraphView {
    /// Build the view from a graph whose groups have already been propagated.
    ///
    /// Groups and classes are ordered by key, dependency targets by short name.
    /// Entities outside `scope`, and edges to entities that are unknown or out
    /// of scope, are left out.
    #[must_use]
    pub fn assemble(graph: &DependencyGraph, scope: &NamespaceScope) -> Self {
        let node = |name: &str| ClassNode { label: scope.short_name(name).to_string(), url_ref: name.to_string() };
        let visible = |key: &str| graph.entity(key).filter(|e| scope.includes(&e.name));

        let groups = graph
            .members_by_group()
            .into_iter()
            .map(|(group, members)| GroupCluster {
                label: graph.name_of(group).to_string(),
                members: members.into_iter().filter_map(visible).map(|e| node(&e.name)).collect(),
            })
            .collect();

        let ungrouped = graph
            .entities
            .values()
            .filter(|e| e.kind.is_class_like() && graph.group_of(&e.key).is_none() && scope.includes(&e.name))
            .map(|e| node(&e.name))
            .collect();

        let dependencies = graph
            .dependencies
            .iter()
            .filter_map(|(from, deps)| {
                let source = visible(from.as_str())?;
                let targets: BTreeSet<String> = deps
                    .iter()
                    .filter_map(|to| visible(to.as_str()))
                    .map(|e| scope.short_name(&e.name).to_string())
                    .collect();
                if targets.is_empty() {
                    return None;
                }
                Some(DependencyList {
                    label: scope.short_name(&source.name).to_string(),
                    targets: targets.into_iter().collect(),
                })
            })
            .collect();

        Self { groups, ungrouped, dependencies }
    }
}
