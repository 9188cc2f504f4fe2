//! Fibonacci benchmark harness CLI
//!
//! Builds every language's benchmark entry, times it, checks its result line
//! and prints a ranked table.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use fibench::{BuildOutcome, HarnessError, Manifest, OutputFormat, Report, Runner};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "fibench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cross-language recursive Fibonacci benchmark", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, run and rank the benchmark entries
    Run {
        /// Manifest to use instead of the built-in one
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Only these languages (repeatable)
        #[arg(long, value_name = "NAME")]
        only: Vec<String>,

        /// Measured runs per language (overrides the manifest)
        #[arg(long)]
        runs: Option<u32>,

        /// Warmup runs per language (overrides the manifest)
        #[arg(long)]
        warmup: Option<u32>,

        /// Build even when the artifact already exists
        #[arg(long)]
        rebuild: bool,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },

    /// Build the benchmark entries without running them
    Build {
        /// Manifest to use instead of the built-in one
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Only these languages (repeatable)
        #[arg(long, value_name = "NAME")]
        only: Vec<String>,

        /// Build even when the artifact already exists
        #[arg(long)]
        rebuild: bool,
    },

    /// List the configured languages
    List {
        /// Manifest to use instead of the built-in one
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fibench=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            manifest,
            only,
            runs,
            warmup,
            rebuild,
            format,
        } => run_benchmarks(manifest.as_deref(), &only, runs, warmup, rebuild, format),
        Commands::Build {
            manifest,
            only,
            rebuild,
        } => run_build(manifest.as_deref(), &only, rebuild),
        Commands::List { manifest } => run_list(manifest.as_deref()),
        Commands::Completions { shell } => {
            run_completions(shell);
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "fibench", &mut io::stdout());
}

/// Returns whether every selected entry finished OK
fn run_benchmarks(
    manifest_path: Option<&Path>,
    only: &[String],
    runs: Option<u32>,
    warmup: Option<u32>,
    rebuild: bool,
    format: OutputFormat,
) -> Result<bool, HarnessError> {
    let mut manifest = Manifest::load(manifest_path)?;
    if let Some(runs) = runs {
        manifest.benchmark.runs = runs;
    }
    if let Some(warmup) = warmup {
        manifest.benchmark.warmup = warmup;
    }
    manifest.validate()?;

    let entries = manifest.select(only)?;
    info!(
        benchmark = %manifest.benchmark.name,
        languages = entries.len(),
        runs = manifest.benchmark.runs,
        warmup = manifest.benchmark.warmup,
        "starting"
    );

    let runner = Runner::new(manifest.benchmark.clone()).with_rebuild(rebuild);
    let results = runner.run_all(&entries);
    let report = Report::new(runner.settings(), results);

    print!("{}", report.render(format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(report.all_ok())
}

/// Returns whether every selected entry built
fn run_build(
    manifest_path: Option<&Path>,
    only: &[String],
    rebuild: bool,
) -> Result<bool, HarnessError> {
    let manifest = Manifest::load(manifest_path)?;
    manifest.validate()?;
    let entries = manifest.select(only)?;
    let runner = Runner::new(manifest.benchmark.clone()).with_rebuild(rebuild);

    let mut all_built = true;
    for entry in entries {
        let status = match runner.build(entry) {
            BuildOutcome::NotRequired => "nothing to build".to_string(),
            BuildOutcome::UpToDate => "already built, skipping".to_string(),
            BuildOutcome::Built => "OK".to_string(),
            BuildOutcome::Failed(message) => {
                all_built = false;
                format!("FAILED\n{}", indent(&message))
            }
        };
        println!("{:<10} {}", entry.name, status);
    }
    Ok(all_built)
}

fn run_list(manifest_path: Option<&Path>) -> Result<bool, HarnessError> {
    let manifest = Manifest::load(manifest_path)?;
    manifest.validate()?;
    println!(
        "{} (expected {}, {} runs, {} warmup)",
        manifest.benchmark.name,
        manifest.benchmark.expected,
        manifest.benchmark.runs,
        manifest.benchmark.warmup
    );
    for entry in &manifest.languages {
        println!("  {:<10} {}", entry.name, entry.run.join(" "));
    }
    Ok(true)
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
