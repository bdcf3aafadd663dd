//! swapcheck: report call sites whose arguments look swapped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use swapcheck_core::{CallSite, CalleeDescriptor, CheckMode, Checker, CheckerConfiguration, SwapResult};
use swapcheck_frontend_json::{expr_names, read_call_sites};

#[derive(Parser)]
#[command(name = "swapcheck", version, about = "Detects swapped arguments at call sites")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides this).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check call sites from a JSON Lines file ("-" reads stdin).
    Check(CheckArgs),
    /// Check a single call site given on the command line.
    CheckOne(CheckOneArgs),
}

#[derive(Args)]
struct CheckerArgs {
    /// Path to the statistics model database.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Path to a JSON checker configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which detection strategies to run.
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Cover,
    Stats,
    All,
}

impl From<Mode> for CheckMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Cover => CheckMode::Cover,
            Mode::Stats => CheckMode::Stats,
            Mode::All => CheckMode::All,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Args)]
struct CheckArgs {
    /// Call-site records, one JSON object per line.
    input: PathBuf,

    #[command(flatten)]
    checker: CheckerArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Args)]
struct CheckOneArgs {
    /// The fully qualified name of the callee.
    #[arg(long)]
    function: String,

    /// Expression text for each positional argument.
    #[arg(long, num_args = 1.., required = true)]
    args: Vec<String>,

    /// Formal parameter names of the callee.
    #[arg(long, num_args = 1..)]
    params: Option<Vec<String>>,

    #[command(flatten)]
    checker: CheckerArgs,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::CheckOne(args) => run_check_one(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_checker(args: &CheckerArgs) -> Result<Checker> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading configuration {}", path.display()))?;
            serde_json::from_str::<CheckerConfiguration>(&text)
                .with_context(|| format!("parsing configuration {}", path.display()))?
        }
        None => CheckerConfiguration::default(),
    };
    if let Some(model) = &args.model {
        config.model_path = Some(model.clone());
    }
    Checker::new(config).context("building the checker")
}

fn run_check(args: CheckArgs) -> Result<ExitCode> {
    let checker = build_checker(&args.checker)?;
    let mode = CheckMode::from(args.checker.mode);

    let sites = if args.input.as_os_str() == "-" {
        read_sites(io::stdin().lock())?
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("opening {}", args.input.display()))?;
        read_sites(BufReader::new(file))?
    };

    let mut found_swaps = false;
    for site in &sites {
        let results = checker.check_site(site, mode);
        found_swaps |= !results.is_empty();
        report(site, &results, args.format)?;
    }

    Ok(exit_status(found_swaps))
}

fn read_sites<R: BufRead>(reader: R) -> Result<Vec<CallSite>> {
    read_call_sites(reader).context("reading call-site records")
}

fn run_check_one(args: CheckOneArgs) -> Result<ExitCode> {
    let checker = build_checker(&args.checker)?;
    let mode = CheckMode::from(args.checker.mode);

    let site = CallSite {
        callee: CalleeDescriptor {
            fully_qualified_name: args.function,
            param_names: args.params,
            is_variadic: None,
            is_member: None,
        },
        positional_arg_names: args
            .args
            .iter()
            .map(|expr| expr_names::expr_name(expr).into_iter().collect())
            .collect(),
    };

    let results = checker.check_site(&site, mode);
    report(&site, &results, Format::Text)?;

    Ok(exit_status(!results.is_empty()))
}

/// Swaps found is a distinct exit status so scripts can gate on it.
fn exit_status(found_swaps: bool) -> ExitCode {
    if found_swaps {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[derive(Serialize)]
struct SiteReport<'a> {
    function: &'a str,
    results: &'a [SwapResult],
}

fn report(site: &CallSite, results: &[SwapResult], format: Format) -> Result<()> {
    match format {
        Format::Text => {
            for result in results {
                println!("{}", diagnostic(site, result));
            }
        }
        Format::Json => {
            let line = serde_json::to_string(&SiteReport {
                function: &site.callee.fully_qualified_name,
                results,
            })?;
            println!("{line}");
        }
    }
    Ok(())
}

/// The human-readable sentence for one result.
fn diagnostic(site: &CallSite, result: &SwapResult) -> String {
    let callee = match site.callee.fully_qualified_name.as_str() {
        "" => "<unknown>",
        name => name,
    };
    let morphemes1 = comma_separated(&result.morphemes1);
    let morphemes2 = comma_separated(&result.morphemes2);
    format!(
        "{callee}: arguments {} and {} are swapped with morpheme1 = {} and morpheme2 = {} (score {:.2})",
        result.arg1,
        result.arg2,
        morphemes1,
        morphemes2,
        result.score.score()
    )
}

fn comma_separated(morphemes: &std::collections::BTreeSet<String>) -> String {
    morphemes.iter().cloned().collect::<Vec<_>>().join(", ")
}
