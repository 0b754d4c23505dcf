//! Dependency graph model.
//!
//! `DependencyGraph` is the single mutable context filled in by the builder
//! (`builder::GraphBuilder`) and then closed over nesting by
//! `groups::propagate_groups`. Everything downstream (queries, the DOT view)
//! only borrows it.
//!
//! Entities are keyed by their Doxygen refid. All maps are ordered so that any
//! iteration over the graph is reproducible.
use std::collections::{BTreeMap, BTreeSet};

pub mod builder;
pub mod groups;
pub mod namespace;

pub use builder::{GraphBuild, GraphBuilder};
pub use namespace::NamespaceScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassFlavor {
    Class,
    Struct,
    Interface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    ClassLike(ClassFlavor),
    Group,
}

impl EntityKind {
    /// Map a compound `kind` attribute from `index.xml`. Kinds that never take
    /// part in the graph (namespace, file, dir, page, ...) yield `None`.
    #[must_use]
    pub fn from_index_kind(kind: &str) -> Option<Self> {
        match kind {
            "class" => Some(Self::ClassLike(ClassFlavor::Class)),
            "struct" => Some(Self::ClassLike(ClassFlavor::Struct)),
            "interface" => Some(Self::ClassLike(ClassFlavor::Interface)),
            "group" => Some(Self::Group),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, Self::Group)
    }

    #[must_use]
    pub fn is_class_like(self) -> bool {
        matches!(self, Self::ClassLike(_))
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClassLike(ClassFlavor::Class) => "class",
            Self::ClassLike(ClassFlavor::Struct) => "struct",
            Self::ClassLike(ClassFlavor::Interface) => "interface",
            Self::Group => "group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub key: String,
    /// Fully-qualified name, e.g. `Proj::Widget`.
    pub name: String,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    pub entities: BTreeMap<String, Entity>,
    /// source key -> keys it depends on. Never contains a self-edge.
    pub dependencies: BTreeMap<String, BTreeSet<String>>,
    /// nested key -> immediately enclosing key
    pub nesting: BTreeMap<String, String>,
    /// entity key -> group key
    pub group_of: BTreeMap<String, String>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity. The first registration of a key wins.
    pub fn register(&mut self, key: &str, name: &str, kind: EntityKind) {
        self.entities.entry(key.to_string()).or_insert_with(|| Entity {
            key: key.to_string(),
            name: name.to_string(),
            kind,
        });
    }

    #[must_use]
    pub fn entity(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Display name for `key`, falling back to the key itself for entities
    /// that were referenced but never declared in the index.
    #[must_use]
    pub fn name_of<'a>(&'a self, key: &'a str) -> &'a str {
        self.entities.get(key).map_or(key, |e| e.name.as_str())
    }

    /// Record that `from` depends on `to`. Self-edges are dropped.
    /// Returns true if the edge is new.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        self.dependencies.entry(from.to_string()).or_default().insert(to.to_string())
    }

    #[must_use]
    pub fn depends_on(&self, from: &str, to: &str) -> bool {
        self.dependencies.get(from).is_some_and(|deps| deps.contains(to))
    }

    #[must_use]
    pub fn dependencies_of(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(key)
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(BTreeSet::len).sum()
    }

    pub fn record_nesting(&mut self, inner: &str, outer: &str) {
        self.nesting.insert(inner.to_string(), outer.to_string());
    }

    #[must_use]
    pub fn enclosing(&self, key: &str) -> Option<&str> {
        self.nesting.get(key).map(String::as_str)
    }

    pub fn record_group_member(&mut self, member: &str, group: &str) {
        self.group_of.insert(member.to_string(), group.to_string());
    }

    #[must_use]
    pub fn group_of(&self, key: &str) -> Option<&str> {
        self.group_of.get(key).map(String::as_str)
    }

    /// Reverse of `group_of`: group key -> member keys, both in key order.
    #[must_use]
    pub fn members_by_group(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        // group_of iterates in member-key order, so each Vec is already sorted
        for (member, group) in &self.group_of {
            out.entry(group.as_str()).or_default().push(member.as_str());
        }
        out
    }
}
