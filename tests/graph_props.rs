mod common;

use common::{base, compound_xml, function_called_by, index_xml, variable};
use doxdepends::app::{generate, Settings};
use doxdepends::graph::groups::propagate_groups;
use doxdepends::graph::{DependencyGraph, GraphBuilder, NamespaceScope};
use doxdepends::source::MemorySource;
use doxdepends::visualization::{DotOptions, GraphView};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::PathBuf;

fn key(i: usize) -> String {
    format!("class_c{i}")
}

/// `n` classes in namespace `P`; class `i` derives from every `j` in `bases`,
/// holds a member of every type in `fields`, and every `(i, j)` in `calls`
/// makes class `i` call a member of class `j`.
fn corpus(n: usize, bases: &[(usize, usize)], fields: &[(usize, usize)], calls: &[(usize, usize)]) -> MemorySource {
    let entries: Vec<(String, String)> = (0..n).map(|i| (key(i), format!("P::C{i}"))).collect();
    let index: Vec<(&str, &str, &str)> = entries.iter().map(|(k, name)| (k.as_str(), "class", name.as_str())).collect();
    let mut source = MemorySource::new().with_record("index", index_xml(&index));
    for i in 0..n {
        let mut body = Vec::new();
        for &(_, j) in bases.iter().filter(|(from, _)| *from == i) {
            body.push(base(&key(j), &format!("P::C{j}")));
        }
        for (m, &(_, j)) in fields.iter().filter(|(from, _)| *from == i).enumerate() {
            body.push(variable(&key(i), m, &key(j)));
        }
        for (m, &(caller, _)) in calls.iter().filter(|(_, callee)| *callee == i).enumerate() {
            body.push(function_called_by(&key(i), m, &format!("{}_1x{m}", key(caller))));
        }
        source.insert(key(i), compound_xml(&key(i), &body.join("\n")));
    }
    source
}

fn pairs(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..12)
}

fn scenario() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<(usize, usize)>, Vec<(usize, usize)>)> {
    (2usize..7).prop_flat_map(|n| (Just(n), pairs(n), pairs(n), pairs(n)))
}

proptest! {
    #[test]
    fn edges_are_exactly_the_fired_rules((n, bases, fields, calls) in scenario()) {
        let source = corpus(n, &bases, &fields, &calls);
        let graph = GraphBuilder::new(NamespaceScope::everything()).build(&source).unwrap().graph;

        let expected: BTreeSet<(String, String)> = bases
            .iter()
            .chain(&fields)
            .chain(&calls)
            .filter(|(a, b)| a != b)
            .map(|&(a, b)| (key(a), key(b)))
            .collect();
        let actual: BTreeSet<(String, String)> = graph
            .dependencies
            .iter()
            .flat_map(|(from, tos)| tos.iter().map(move |to| (from.clone(), to.clone())))
            .collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(graph.dependencies.iter().all(|(from, tos)| !tos.contains(from)));
    }

    #[test]
    fn rendering_is_deterministic((n, bases, fields, calls) in scenario()) {
        let source = corpus(n, &bases, &fields, &calls);
        let settings = Settings {
            xml_directory: PathBuf::from("xml"),
            scope: NamespaceScope::new(Some("P".into())),
            output_file: PathBuf::from("out.dot"),
            report_cycles: true,
            dot: DotOptions::default(),
        };
        let first = generate(&source, &settings).unwrap();
        let second = generate(&source, &settings).unwrap();
        prop_assert_eq!(&first.dot, &second.dot);
        prop_assert_eq!(first.cycles, second.cycles);
        // labels are short names; full names only appear in \ref links
        prop_assert!(!first.dot.contains("\"P::"));
    }

    #[test]
    fn group_propagation_is_idempotent(
        parents in prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 1..10),
        grouped in prop::collection::vec(prop::option::of(0usize..3), 10),
    ) {
        // entity i may only nest inside an entity with a smaller index, so nesting is a forest
        let mut graph = DependencyGraph::new();
        for (i, parent) in parents.iter().enumerate() {
            if let (Some(p), true) = (parent, i > 0) {
                graph.record_nesting(&format!("e{i}"), &format!("e{}", p.index(i)));
            }
            if let Some(g) = grouped[i] {
                graph.record_group_member(&format!("e{i}"), &format!("g{g}"));
            }
        }
        propagate_groups(&mut graph);
        let once = graph.clone();
        prop_assert_eq!(propagate_groups(&mut graph), 0);
        prop_assert_eq!(graph, once);
    }

    #[test]
    fn nested_entities_share_the_group_of_their_container(
        parents in prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 1..10),
        grouped in prop::collection::vec(prop::option::of(0usize..3), 10),
    ) {
        let mut graph = DependencyGraph::new();
        for (i, parent) in parents.iter().enumerate() {
            if let (Some(p), true) = (parent, i > 0) {
                graph.record_nesting(&format!("e{i}"), &format!("e{}", p.index(i)));
            }
            if let Some(g) = grouped[i] {
                graph.record_group_member(&format!("e{i}"), &format!("g{g}"));
            }
        }
        propagate_groups(&mut graph);
        for (inner, outer) in &graph.nesting {
            if let Some(group) = graph.group_of(outer) {
                prop_assert_eq!(graph.group_of(inner), Some(group));
            }
        }
    }

    #[test]
    fn scoped_view_is_a_subset_of_the_full_view(
        names in prop::collection::vec(
            (prop::sample::select(vec!["Proj::", "Proj.", "Project::", "Other::", ""]), "[A-Z][a-z]{0,5}"),
            1..8,
        ),
    ) {
        let entries: Vec<(String, String)> =
            names.iter().enumerate().map(|(i, (ns, n))| (key(i), format!("{ns}{n}"))).collect();
        let index: Vec<(&str, &str, &str)> = entries.iter().map(|(k, name)| (k.as_str(), "class", name.as_str())).collect();
        let mut source = MemorySource::new().with_record("index", index_xml(&index));
        for (k, _) in &entries {
            source.insert(k.clone(), compound_xml(k, ""));
        }

        let scope = NamespaceScope::new(Some("Proj".into()));
        let scoped_graph = GraphBuilder::new(scope.clone()).build(&source).unwrap().graph;
        let full_graph = GraphBuilder::new(NamespaceScope::everything()).build(&source).unwrap().graph;
        let scoped: BTreeSet<String> =
            GraphView::assemble(&scoped_graph, &scope).ungrouped.into_iter().map(|n| n.url_ref).collect();
        let full: BTreeSet<String> = GraphView::assemble(&full_graph, &NamespaceScope::everything())
            .ungrouped
            .into_iter()
            .map(|n| n.url_ref)
            .collect();
        prop_assert!(scoped.is_subset(&full));
        prop_assert!(scoped.iter().all(|n| n.starts_with("Proj::") || n.starts_with("Proj.")));
    }

    #[test]
    fn short_name_strips_only_the_target_prefix(suffix in "[A-Za-z:.]{1,12}") {
        let scope = NamespaceScope::new(Some("Proj".into()));
        let colon = format!("Proj::{suffix}");
        let dot = format!("Proj.{suffix}");
        prop_assert_eq!(scope.short_name(&colon), suffix.as_str());
        prop_assert_eq!(scope.short_name(&dot), suffix.as_str());
        if !suffix.starts_with("Proj::") && !suffix.starts_with("Proj.") {
            prop_assert_eq!(scope.short_name(&suffix), suffix.as_str());
        }
        prop_assert_eq!(NamespaceScope::everything().short_name(&colon), colon.as_str());
    }
}
