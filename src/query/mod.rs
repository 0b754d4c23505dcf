use crate::graph::DependencyGraph;

/// Query trait implemented by all query types.
///
/// Given an immutable reference to a `DependencyGraph`, returns a result of type `R`.
pub trait Query<R> {
    fn run(&self, graph: &DependencyGraph) -> R;
}

/// Two entities that depend on each other directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectCycle {
    pub from: String,
    pub to: String,
}

/// Find cycles of length two (A -> B and B -> A).
///
/// Longer cycles such as A -> B -> C -> A are not reported. Every mutual pair
/// is reported once per direction, ordered by source key then target key.
#[derive(Debug, Default)]
pub struct DirectCycleQuery;

impl DirectCycleQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

// Returns (from, to) key pairs
impl Query<Vec<DirectCycle>> for DirectCycleQuery {
    fn run(&self, graph: &DependencyGraph) -> Vec<DirectCycle> {
        let mut out = Vec::new();
        for (from, deps) in &graph.dependencies {
            for to in deps {
                if graph.depends_on(to, from) {
                    out.push(DirectCycle { from: from.clone(), to: to.clone() });
                }
            }
        }
        out
    }
}

/// Render cycles the way the CLI prints them, using full entity names.
#[must_use]
pub fn describe_cycles(graph: &DependencyGraph, cycles: &[DirectCycle]) -> Vec<String> {
    cycles
        .iter()
        .map(|c| format!("*** Cycle between {} and {}", graph.name_of(&c.from), graph.name_of(&c.to)))
        .collect()
}
