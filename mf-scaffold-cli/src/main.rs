//! # mf-scaffold
//!
//! CLI tool for generating C# model classes from an M-Files vault schema
//! snapshot.
//!
//! ## Usage
//!
//! ```bash
//! # Generate models into the current project
//! mf-scaffold generate --snapshot schema.json --namespace Contoso
//!
//! # Regenerate, replacing existing generated files
//! mf-scaffold generate --force
//!
//! # Preview without writing
//! mf-scaffold generate --dry-run
//!
//! # Look up an id
//! mf-scaffold resolve --kind property-definition PD.Customer
//!
//! # Initialize configuration
//! mf-scaffold init
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mf_scaffold::{
    generator::{IndentStyle, LineEnding},
    ident::{resolve_id, resolve_item, ItemReference, Reference},
    host::HostUi,
    orchestrator::GenerationOrchestrator,
    schema::{SchemaElementKind, SchemaSnapshot},
    writer::WriteResult,
};
use mf_scaffold_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    console::ConsoleHost,
    error::CliError,
    parse_kind,
    writer::FsProjectWriter,
};

#[derive(Parser)]
#[command(name = "mf-scaffold")]
#[command(author, version, about = "Generate C# models from an M-Files vault schema", long_about = None)]
struct Cli {
    /// Show verbose progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model classes from a schema snapshot
    Generate {
        /// Project directory
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Root namespace of the project
        #[arg(short, long)]
        namespace: Option<String>,

        /// Schema snapshot (JSON)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Split classes into generated and hand-editable partial files
        #[arg(long)]
        partials: bool,

        /// Overwrite existing generated files
        #[arg(short, long)]
        force: bool,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Line endings of generated files
        #[arg(long, value_enum)]
        line_ending: Option<LineEndingArg>,

        /// Indentation of generated files
        #[arg(long, value_enum)]
        indent: Option<IndentArg>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Resolve an alias, GUID or id to a vault id
    Resolve {
        /// Element kind (object-type, object-class, property-definition, ...)
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<SchemaElementKind>,

        /// Treat the reference as an object reference ("(type-id)", GUID or id)
        #[arg(long, conflicts_with = "kind")]
        item: bool,

        /// Schema snapshot (JSON)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Alias, braced GUID or numeric id
        reference: String,
    },

    /// Compare schema sources
    Diff {
        /// What to compare
        #[arg(short, long, value_enum, default_value_t = DiffMode::ServerAndLocal)]
        mode: DiffMode,
    },

    /// Initialize a new mf-scaffold configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LineEndingArg {
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Lf => LineEnding::Lf,
            LineEndingArg::Crlf => LineEnding::CrLf,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum IndentArg {
    Spaces2,
    Spaces4,
    Tabs,
}

impl From<IndentArg> for IndentStyle {
    fn from(arg: IndentArg) -> Self {
        match arg {
            IndentArg::Spaces2 => IndentStyle::Spaces2,
            IndentArg::Spaces4 => IndentStyle::Spaces4,
            IndentArg::Tabs => IndentStyle::Tabs,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DiffMode {
    ServerAndLocal,
    ServerAndModels,
    LocalAndModels,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            if e.is_validation() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Developer trace on stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "mf_scaffold=debug" } else { "mf_scaffold=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let host = ConsoleHost::new(cli.verbose);

    match cli.command {
        Commands::Generate {
            project,
            namespace,
            snapshot,
            partials,
            force,
            dry_run,
            line_ending,
            indent,
            config,
        } => {
            let args = CliArgs {
                project_dir: project,
                root_namespace: namespace,
                snapshot,
                partials: partials.then_some(true),
                force: force.then_some(true),
                line_ending: line_ending.map(Into::into),
                indent: indent.map(Into::into),
            };
            let config = load_config(config, &args)?;
            cmd_generate(&config, dry_run, &host)
        }

        Commands::Resolve {
            kind,
            item,
            snapshot,
            config,
            reference,
        } => {
            let args = CliArgs {
                snapshot,
                ..Default::default()
            };
            let config = load_config(config, &args)?;
            cmd_resolve(&config, kind, item, &reference)
        }

        Commands::Diff { mode } => cmd_diff(mode, &host),

        Commands::Init { output, force } => cmd_init(output, force),
    }
}

fn load_config(path: Option<PathBuf>, args: &CliArgs) -> Result<Config, CliError> {
    let config = ConfigManager::load(path.as_deref())?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

fn load_snapshot(config: &Config) -> Result<SchemaSnapshot, CliError> {
    let path = config.snapshot_path();
    if !path.exists() {
        return Err(CliError::Validation(format!(
            "Schema snapshot not found: {}",
            path.display()
        )));
    }
    Ok(SchemaSnapshot::load(&path)?)
}

/// Generate command implementation.
fn cmd_generate(config: &Config, dry_run: bool, host: &ConsoleHost) -> Result<(), CliError> {
    println!("{}", "Loading schema snapshot...".cyan());
    let schema = load_snapshot(config)?;
    println!(
        "  {} object type(s), {} class(es), {} property definition(s)",
        schema.object_types.len().to_string().green(),
        schema.classes.len().to_string().green(),
        schema.property_defs.len().to_string().green()
    );

    let orchestrator = GenerationOrchestrator::new(&schema, host, config.generator_config());
    let mut writer = FsProjectWriter::new(&config.project.dir, dry_run);

    println!("{}", "Generating models...".cyan());
    let plan = orchestrator.plan(&writer, config.generation.force)?;
    let report = orchestrator.apply(plan, &mut writer)?;

    for result in &report.results {
        if let WriteResult::DryRun { content, path } = result {
            println!("{} Would write to {}:", "[dry-run]".yellow(), path.display());
            println!("{}", "─".repeat(60).dimmed());
            println!("{content}");
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    if dry_run {
        println!(
            "{} {} file(s) would be written",
            "[dry-run]".yellow(),
            report.results.len()
        );
    } else {
        println!(
            "{} Written {} file(s), {} bytes to {}",
            "✓".green(),
            report.results.len(),
            report.bytes_written(),
            writer.root().display()
        );
    }
    if !report.kept.is_empty() {
        println!("  Kept {} existing partial file(s)", report.kept.len());
    }

    Ok(())
}

/// Resolve command implementation.
fn cmd_resolve(
    config: &Config,
    kind: Option<SchemaElementKind>,
    item: bool,
    reference: &str,
) -> Result<(), CliError> {
    let schema = load_snapshot(config)?;

    if item {
        let object = resolve_item(&schema, &ItemReference::from(reference))?;
        println!("{object}");
        return Ok(());
    }

    let Some(kind) = kind else {
        return Err(CliError::Validation(
            "Either --kind or --item is required".to_string(),
        ));
    };
    let id = resolve_id(&schema, kind, &Reference::from(reference))?;
    println!("{id}");
    Ok(())
}

/// Diff command implementation.
fn cmd_diff(mode: DiffMode, host: &ConsoleHost) -> Result<(), CliError> {
    tracing::debug!(?mode, "diff requested");
    host.warning("Functionality not completed.");
    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(
            "Configuration file already exists".to_string(),
        ));
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
