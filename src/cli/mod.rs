use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILE: &str = "doxdepends.dot";

#[derive(Debug, Parser)]
#[command(
    name = "doxdepends",
    version,
    about = "Class dependency graphs from Doxygen XML",
    long_about = "Parses XML output from Doxygen to discover class dependencies, then outputs a graph in dot format that can be added to Doxygen documentation using the \\dotfile special command. If classes are defined as parts of Doxygen groups, those groups are represented as clusters in the dependency graph."
)]
pub struct Cli {
    /// Print information about dependency cycles between classes to standard output
    #[arg(short = 'c', long, alias = "report_cycles", default_value_t = false)]
    pub report_cycles: bool,

    /// Target namespace for the graph
    #[arg(
        short = 'n',
        long,
        alias = "target_namespace",
        value_name = "NAMESPACE",
        env = "DOXDEPENDS_TARGET_NAMESPACE",
        long_help = "Target namespace for the graph. Any entity within that namespace has its namespace prefix (such as \"MyProject::\") removed in the graph. Entities in other namespaces do not appear in the graph."
    )]
    pub target_namespace: Option<String>,

    /// Output file for the dot graph [default: doxdepends.dot]
    #[arg(short = 'o', long, alias = "output_file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Print verbose progress information during processing
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Path to a TOML configuration file (default: doxdepends.toml in the XML directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// DOT: rank direction
    #[arg(long, value_enum)]
    pub rankdir: Option<RankDirArg>,

    /// Print shell completions for SHELL and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,

    /// Directory containing the XML produced by Doxygen for the project
    #[arg(required_unless_present = "completions")]
    pub xml_directory: Option<PathBuf>,
}

impl Cli {
    /// Arguments equivalent to `doxdepends <xml_directory>`.
    pub fn for_directory<P: Into<PathBuf>>(xml_directory: P) -> Self {
        Self {
            report_cycles: false,
            target_namespace: None,
            output_file: None,
            verbose: false,
            config: None,
            rankdir: None,
            completions: None,
            xml_directory: Some(xml_directory.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankDirArg {
    #[value(name = "LR")]
    LR,
    #[value(name = "TB")]
    TB,
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
