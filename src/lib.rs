//! doxdepends: class dependency graphs from Doxygen XML
//!
//! Parses the XML output of Doxygen to discover direct dependencies between
//! classes, structs and interfaces, then writes a Graphviz DOT graph that can
//! be embedded into the documentation with Doxygen's `\dotfile` command. This
//! is useful for languages such as C# that do not spell out their
//! dependencies in `#include` statements.
//!
//! Classes that are members of a Doxygen group are drawn inside a cluster for
//! that group; nested classes follow their outer class into its cluster.
//!
//! # Quickstart (Library)
//! ```no_run
//! use doxdepends::graph::{groups, GraphBuilder, NamespaceScope};
//! use doxdepends::source::DirectorySource;
//! use doxdepends::visualization::{DotGenerator, GraphView};
//!
//! let scope = NamespaceScope::new(Some("MyProject".to_string()));
//! let source = DirectorySource::new("docs/xml");
//! let mut build = GraphBuilder::new(scope.clone()).build(&source).expect("index.xml");
//! groups::propagate_groups(&mut build.graph);
//! let view = GraphView::assemble(&build.graph, &scope);
//! println!("{}", DotGenerator::new().generate_dot(&view));
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! doxdepends --target-namespace MyProject --output-file deps.dot docs/xml
//! doxdepends --report-cycles docs/xml
//! ```
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod parser;
pub mod query;
pub mod source;
pub mod utils;
pub mod visualization;
