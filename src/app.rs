use crate::cli::{Cli, RankDirArg, DEFAULT_OUTPUT_FILE};
use crate::errors::DependsError;
use crate::graph::{groups, GraphBuilder, NamespaceScope};
use crate::query::{describe_cycles, DirectCycleQuery, Query};
use crate::source::{DirectorySource, RecordSource};
use crate::utils::config::{self, Config};
use crate::visualization::{self, DotGenerator, DotOptions, GraphView, RankDir};
use clap::CommandFactory;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub xml_directory: PathBuf,
    pub scope: NamespaceScope,
    pub output_file: PathBuf,
    pub report_cycles: bool,
    pub dot: DotOptions,
}

impl Settings {
    /// Flags win over the config file, the config file over built-in defaults.
    #[must_use]
    pub fn resolve(cli: &Cli, xml_directory: PathBuf, cfg: Config) -> Self {
        let dot_cfg = cfg.dot.unwrap_or_default();
        let rankdir = match (cli.rankdir, dot_cfg.rankdir.as_deref()) {
            (Some(RankDirArg::TB), _) => RankDir::TB,
            (Some(RankDirArg::LR), _) => RankDir::LR,
            (None, Some("TB")) => RankDir::TB,
            (None, _) => RankDir::LR,
        };
        let defaults = DotOptions::default();
        Self {
            xml_directory,
            scope: NamespaceScope::new(cli.target_namespace.clone().or(cfg.target_namespace)),
            output_file: cli
                .output_file
                .clone()
                .or_else(|| cfg.output_file.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            report_cycles: cli.report_cycles || cfg.report_cycles.unwrap_or(false),
            dot: DotOptions {
                rankdir,
                concentrate: dot_cfg.concentrate.unwrap_or(defaults.concentrate),
                links: dot_cfg.links.unwrap_or(defaults.links),
            },
        }
    }
}

/// Everything one pass over the records produces.
#[derive(Debug)]
pub struct Generated {
    pub dot: String,
    /// Cycle report lines; empty unless cycle reporting was requested.
    pub cycles: Vec<String>,
    /// Records that could not be read and were left out of the graph.
    pub skipped: Vec<DependsError>,
}

/// Build the dependency graph from `source` and render it.
///
/// # Errors
/// Returns `DependsError::IndexUnavailable` if the index record is missing or unparsable.
pub fn generate<S: RecordSource + ?Sized>(source: &S, settings: &Settings) -> Result<Generated, DependsError> {
    let build = GraphBuilder::new(settings.scope.clone()).build(source)?;
    let mut graph = build.graph;

    let cycles = if settings.report_cycles {
        let found = DirectCycleQuery::new().run(&graph);
        describe_cycles(&graph, &found)
    } else {
        Vec::new()
    };

    let moved = groups::propagate_groups(&mut graph);
    info!(moved, "nested classes assigned to groups");

    let view = GraphView::assemble(&graph, &settings.scope);
    let dot = DotGenerator::new().generate_dot_with_options(&view, settings.dot);
    Ok(Generated { dot, cycles, skipped: build.skipped })
}

/// Read the XML directory, report cycles if requested and write the DOT file.
///
/// # Errors
/// Returns a fatal `DependsError` if the index is unavailable or the output cannot be written.
pub fn run(settings: &Settings) -> Result<Generated, DependsError> {
    info!("Using XML_DIRECTORY \"{}\"", settings.xml_directory.display());
    let source = DirectorySource::new(&settings.xml_directory);
    let generated = generate(&source, settings)?;
    for line in &generated.cycles {
        println!("{line}");
    }
    visualization::write_dot(&settings.output_file, &generated.dot)?;
    info!("Wrote \"{}\"", settings.output_file.display());
    Ok(generated)
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success).
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = env!("CARGO_PKG_NAME");
        let mut out = io::stdout();
        clap_complete::generate(shell, &mut cmd, bin_name, &mut out);
        return 0;
    }

    init_logging(cli.verbose);

    let Some(xml_directory) = cli.xml_directory.clone() else {
        eprintln!("*** No XML directory given");
        return 2;
    };
    let cfg = match cli.config.as_ref() {
        Some(path) => config::load_config_at(path),
        None => config::load_config_near(&xml_directory),
    };
    let settings = Settings::resolve(&cli, xml_directory, cfg.unwrap_or_default());

    match run(&settings) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("*** {e}: aborting");
            1
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when run_cli is called more than once in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .try_init();
}
