use crate::errors::DependsError;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

pub mod view;

pub use view::{ClassNode, DependencyList, GraphView, GroupCluster};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    LR,
    TB,
}

#[derive(Debug, Clone, Copy)]
pub struct DotOptions {
    pub rankdir: RankDir,
    /// Ask Graphviz to merge parallel edges.
    pub concentrate: bool,
    /// Emit `URL="\ref <name>"` on nodes so the graph links into Doxygen pages.
    pub links: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self { rankdir: RankDir::LR, concentrate: true, links: true }
    }
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Generate DOT with default options.
    #[must_use]
    pub fn generate_dot(&self, view: &GraphView) -> String {
        self.generate_dot_with_options(view, DotOptions::default())
    }

    /// Transcribe `view` into DOT, in the view's order.
    ///
    /// The output is meant to be embedded into Doxygen documentation with `\dotfile`.
    #[must_use]
    pub fn generate_dot_with_options(&self, view: &GraphView, opts: DotOptions) -> String {
        let mut s = String::new();
        s.push_str("digraph dependencies {\n");
        let rank = match opts.rankdir {
            RankDir::LR => "LR",
            RankDir::TB => "TB",
        };
        let _ = writeln!(s, " rankdir=\"{rank}\";");
        if opts.concentrate {
            s.push_str(" concentrate=true;\n");
        }
        s.push_str(" node [shape=record, fontname=Verdana, fontsize=10, margin=.1, width=.2, height=.2];\n");

        for (i, group) in view.groups.iter().enumerate() {
            let _ = writeln!(s, " subgraph cluster_{i} {{");
            let _ = writeln!(s, "   label     = \"{}\";", escape_label(&group.label));
            s.push_str("   labeljust = r;\n");
            s.push_str("   color     = darkorange;\n");
            s.push_str("   fontcolor = darkorange;\n");
            s.push_str("   fontsize  = 12;\n");
            s.push_str("   fontname  = \"Verdana\";\n");
            s.push_str("   penwidth  = 2;\n");
            for member in &group.members {
                write_node(&mut s, member, "   ", opts.links);
            }
            s.push_str(" }\n");
        }

        for node in &view.ungrouped {
            write_node(&mut s, node, " ", opts.links);
        }

        for dep in &view.dependencies {
            let targets: Vec<String> = dep.targets.iter().map(|t| format!("\"{}\"", escape_label(t))).collect();
            let _ = writeln!(s, " \"{}\" -> {{ {} }};", escape_label(&dep.label), targets.join(" "));
        }

        s.push_str("}\n");
        s
    }
}

fn write_node(out: &mut String, node: &ClassNode, indent: &str, links: bool) {
    let label = escape_label(&node.label);
    if links {
        let _ = writeln!(out, "{indent}\"{label}\" [URL=\"\\ref {}\", fontcolor=blue];", escape_label(&node.url_ref));
    } else {
        let _ = writeln!(out, "{indent}\"{label}\" [fontcolor=blue];");
    }
}

fn escape_label(s: &str) -> String {
    s.replace('"', "\\\"")
}

/// Write rendered DOT to `path`.
///
/// # Errors
/// Returns `DependsError::OutputUnwritable` if the file cannot be created or written.
pub fn write_dot(path: &Path, dot: &str) -> Result<(), DependsError> {
    let unwritable = |source: std::io::Error| DependsError::OutputUnwritable { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(unwritable)?;
    let mut out = BufWriter::new(file);
    out.write_all(dot.as_bytes()).map_err(unwritable)?;
    out.flush().map_err(unwritable)
}
