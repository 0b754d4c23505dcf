//! Dependency inference over Doxygen records.
//!
//! Class C1 depends directly on class C2 when any of these holds:
//! - C1 derives directly from C2;
//! - C2 is nested inside C1;
//! - C1 has a member variable of type C2;
//! - C1 has a member function returning C2 or taking a parameter of type C2;
//! - code in C1 calls a member function of C2.
use super::{DependencyGraph, EntityKind, NamespaceScope};
use crate::errors::DependsError;
use crate::parser::{CompoundRecord, MemberKind};
use crate::source::RecordSource;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Doxygen member refids are the owning compound's refid, this delimiter and a
/// per-member hash, e.g. `class_foo_1a3b6f...`.
pub const MEMBER_KEY_DELIMITER: char = '_';

/// Outcome of a build: the graph plus every record that had to be skipped.
#[derive(Debug)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    /// Recoverable failures, in index order. Never contains a fatal error.
    pub skipped: Vec<DependsError>,
}

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    scope: NamespaceScope,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(scope: NamespaceScope) -> Self {
        Self { scope }
    }

    #[must_use]
    pub fn scope(&self) -> &NamespaceScope {
        &self.scope
    }

    /// Read the index and every relevant compound record from `source` and infer dependencies.
    ///
    /// Detail records are fetched in parallel; results are merged in index order
    /// afterwards so the graph is the same regardless of scheduling.
    ///
    /// # Errors
    /// Returns `DependsError::IndexUnavailable` if the index cannot be read or parsed.
    /// Unavailable class or group records are not errors; they are listed in
    /// `GraphBuild::skipped`.
    pub fn build<S: RecordSource + ?Sized>(&self, source: &S) -> Result<GraphBuild, DependsError> {
        let index = source.index().map_err(DependsError::IndexUnavailable)?;

        let mut graph = DependencyGraph::new();
        let mut jobs: Vec<(&str, EntityKind)> = Vec::new();
        for entry in &index.compounds {
            let Some(kind) = EntityKind::from_index_kind(&entry.kind) else {
                continue;
            };
            let name = entry.name.as_deref().unwrap_or(&entry.refid);
            graph.register(&entry.refid, name, kind);
            if kind.is_group() || self.scope.includes(name) {
                jobs.push((entry.refid.as_str(), kind));
            } else {
                debug!(key = %entry.refid, name, "outside target namespace, not fetched");
            }
        }

        let fetched: Vec<_> = jobs
            .par_iter()
            .map(|&(key, kind)| {
                info!("Processing {} file \"{key}.xml\"", kind.as_str());
                (key, kind, source.compound(key))
            })
            .collect();

        let mut skipped = Vec::new();
        for (key, kind, result) in fetched {
            match result {
                Ok(record) if kind.is_group() => apply_group(&mut graph, key, &record),
                Ok(record) => self.apply_class(&mut graph, key, &record),
                Err(err) => {
                    warn!("{err}");
                    skipped.push(DependsError::RecordUnavailable { key: key.to_string(), source: err });
                }
            }
        }

        info!(
            entities = graph.entities.len(),
            edges = graph.edge_count(),
            skipped = skipped.len(),
            "dependency graph built"
        );
        Ok(GraphBuild { graph, skipped })
    }

    fn apply_class(&self, graph: &mut DependencyGraph, key: &str, record: &CompoundRecord) {
        for base in &record.bases {
            if let Some(base_key) = base.refid.as_deref() {
                if self.scope.includes(&base.name) {
                    graph.add_dependency(key, base_key);
                }
            }
        }

        // Nesting is recorded regardless of namespace.
        for inner in &record.inner_classes {
            graph.add_dependency(key, inner);
            graph.record_nesting(inner, key);
        }

        for member in &record.members {
            match member.kind {
                MemberKind::Variable => {
                    if let Some(ty) = member.type_ref.as_deref() {
                        graph.add_dependency(key, ty);
                    }
                }
                MemberKind::Function => {
                    if let Some(ty) = member.type_ref.as_deref() {
                        graph.add_dependency(key, ty);
                    }
                    for ty in member.params.iter().flatten() {
                        graph.add_dependency(key, ty);
                    }
                    for caller in &member.referenced_by {
                        if let Some(owner) = owning_entity(caller) {
                            graph.add_dependency(owner, key);
                        }
                    }
                }
                MemberKind::Other => {}
            }
        }
    }
}

fn apply_group(graph: &mut DependencyGraph, group: &str, record: &CompoundRecord) {
    for member in &record.inner_classes {
        graph.record_group_member(member, group);
    }
}

/// Key of the compound owning the member `member_key`.
#[must_use]
pub fn owning_entity(member_key: &str) -> Option<&str> {
    member_key
        .rsplit_once(MEMBER_KEY_DELIMITER)
        .map(|(owner, _)| owner)
        .filter(|owner| !owner.is_empty())
}
