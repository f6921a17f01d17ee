//! gene-entropy CLI: entropy and mutual information of the two-state
//! stochastic gene-expression model.
//!
//! stdout carries only command payloads (the formatted scalar, or JSONL
//! sweep records); diagnostics and logs go to stderr. A legitimate `NaN`
//! result prints the sentinel and exits 0; true errors exit non-zero with
//! the offending parameters in the diagnostic.

use clap::{Args, Parser, Subcommand, ValueEnum};
use ge_cache::ResultStore;
use ge_common::{Parameters, PrecisionSpec, Quantity};
use ge_config::SweepConfig;
use ge_core::exit_codes::ExitCode;
use ge_core::sweep::{run_sweep, SweepOptions, SweepRecord};
use ge_core::truncation::resolve_bound;
use ge_core::{dist, entropy, format, logging};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Entropy engine for the externally regulated binary gene model
#[derive(Parser)]
#[command(name = "ge-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format for single evaluations
    #[arg(long, short = 'f', global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// The formatted scalar only
    #[default]
    Text,
    /// A JSON record with parameters, truncation bound and value
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one quantity of the binary model (h, h-on, h-off, i)
    Eval(EvalArgs),

    /// Entropy of the constitutive (Poisson) reference model
    EvalConst(EvalConstArgs),

    /// Evaluate one stationary mass term (phi, alpha, beta) at a state index
    Dist(DistArgs),

    /// Run configured parameter sweeps, emitting JSONL records to stdout
    Sweep(SweepArgs),
}

#[derive(Args)]
struct EvalArgs {
    /// Quantity to evaluate
    quantity: Quantity,
    /// Promoter switching rate over degradation rate
    epsilon: f64,
    /// Probability of the ON promoter state
    palpha: f64,
    /// Mean copy number of the equivalent constitutive gene
    n_mean: f64,
    /// Significant digits (1-12)
    #[arg(default_value_t = ge_common::precision::DEFAULT_TARGET_DIGITS)]
    digits: u32,
    /// Explicit series truncation bound (defaults to the tail estimator)
    k: Option<u64>,
}

#[derive(Args)]
struct EvalConstArgs {
    /// Mean copy number
    n_mean: f64,
    /// Significant digits (1-12)
    #[arg(default_value_t = ge_common::precision::DEFAULT_TARGET_DIGITS)]
    digits: u32,
    /// Explicit series truncation bound
    k: Option<u64>,
}

#[derive(Args)]
struct DistArgs {
    /// Mass term (phi, alpha, beta)
    term: Quantity,
    /// Copy-number state index
    state: u64,
    /// Promoter switching rate over degradation rate
    epsilon: f64,
    /// Probability of the ON promoter state
    palpha: f64,
    /// Mean copy number of the equivalent constitutive gene
    n_mean: f64,
    /// Significant digits (1-12)
    #[arg(default_value_t = ge_common::precision::DEFAULT_TARGET_DIGITS)]
    digits: u32,
}

#[derive(Args)]
struct SweepArgs {
    /// Sweep configuration file (JSON)
    config: PathBuf,

    /// Run only the named figure
    #[arg(long)]
    figure: Option<String>,

    /// Worker threads (defaults to config, then available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Disable the persistent result cache
    #[arg(long)]
    no_cache: bool,

    /// Cache file location (defaults to the platform cache directory)
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Also write per-curve data files into this directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// JSON payload for single evaluations.
#[derive(Serialize)]
struct EvalReport {
    quantity: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    epsilon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    palpha: Option<f64>,
    n_mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<u64>,
    digits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    k: Option<u64>,
    value: ge_common::EvalResult,
    formatted: String,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.global.verbose, cli.global.quiet);
    let code = run(cli);
    std::process::exit(code.as_i32());
}

fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Eval(args) => cmd_eval(args, cli.global.format),
        Commands::EvalConst(args) => cmd_eval_const(args, cli.global.format),
        Commands::Dist(args) => cmd_dist(args, cli.global.format),
        Commands::Sweep(args) => cmd_sweep(args),
    }
}

fn emit_report(report: &EvalReport, format: OutputFormat) -> ExitCode {
    match format {
        OutputFormat::Text => println!("{}", report.formatted),
        OutputFormat::Json => match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                eprintln!("ge-core: failed to serialize result: {err}");
                return ExitCode::InternalError;
            }
        },
    }
    ExitCode::Ok
}

fn cmd_eval(args: EvalArgs, format: OutputFormat) -> ExitCode {
    if !args.quantity.is_entropy_family() {
        eprintln!(
            "ge-core: {} takes a state index; use 'ge-core dist' instead",
            args.quantity
        );
        return ExitCode::ArgsError;
    }

    let (params, spec) = match parse_tuple(args.epsilon, args.palpha, args.n_mean, args.digits, args.k)
    {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    match entropy::evaluate(args.quantity, &params, &spec) {
        Ok(value) => {
            let report = EvalReport {
                quantity: args.quantity,
                epsilon: Some(params.epsilon()),
                palpha: Some(params.palpha()),
                n_mean: params.n_mean(),
                state: None,
                digits: spec.digits(),
                k: Some(resolve_bound(&params, &spec)),
                value,
                formatted: format::format_result(value, spec.digits()),
            };
            emit_report(&report, format)
        }
        Err(err) => {
            eprintln!("ge-core: {err}");
            ExitCode::from_error(&err)
        }
    }
}

fn cmd_eval_const(args: EvalConstArgs, format: OutputFormat) -> ExitCode {
    let spec = match build_spec(args.digits, args.k) {
        Ok(spec) => spec,
        Err(code) => return code,
    };

    match entropy::entropy_constitutive(args.n_mean, &spec) {
        Ok(value) => {
            let k = spec
                .explicit_k()
                .unwrap_or_else(|| ge_core::truncation::truncation_bound(args.n_mean, spec.digits()));
            let report = EvalReport {
                quantity: Quantity::HConstitutive,
                epsilon: None,
                palpha: None,
                n_mean: args.n_mean,
                state: None,
                digits: spec.digits(),
                k: Some(k),
                value,
                formatted: format::format_result(value, spec.digits()),
            };
            emit_report(&report, format)
        }
        Err(err) => {
            eprintln!("ge-core: {err}");
            ExitCode::from_error(&err)
        }
    }
}

fn cmd_dist(args: DistArgs, format: OutputFormat) -> ExitCode {
    if args.term.is_entropy_family() {
        eprintln!(
            "ge-core: {} is an entropy-family quantity; use 'ge-core eval' instead",
            args.term
        );
        return ExitCode::ArgsError;
    }

    let (params, spec) = match parse_tuple(args.epsilon, args.palpha, args.n_mean, args.digits, None)
    {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    let raw = match dist::mass_term(args.term, &params, args.state) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("ge-core: {err}");
            return ExitCode::from_error(&err);
        }
    };
    let value = ge_common::EvalResult::from_value(raw);
    let report = EvalReport {
        quantity: args.term,
        epsilon: Some(params.epsilon()),
        palpha: Some(params.palpha()),
        n_mean: params.n_mean(),
        state: Some(args.state),
        digits: spec.digits(),
        k: None,
        value,
        formatted: format::format_result(value, spec.digits()),
    };
    emit_report(&report, format)
}

fn cmd_sweep(args: SweepArgs) -> ExitCode {
    let mut config = match SweepConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ge-core: {err}");
            return ExitCode::ConfigError;
        }
    };

    if let Some(figure) = &args.figure {
        if !config.figures.contains_key(figure) {
            eprintln!("ge-core: figure '{figure}' not found in {}", args.config.display());
            return ExitCode::ConfigError;
        }
        config.figures.retain(|name, _| name == figure);
    }

    let cache = if args.no_cache {
        None
    } else {
        let path = args.cache_file.unwrap_or_else(ResultStore::default_path);
        match ResultStore::open(path) {
            Ok(store) => {
                if let Some(warning) = store.load_warning() {
                    warn!("{warning}");
                }
                Some(Arc::new(store))
            }
            Err(err) => {
                // The cache is an optimization; never fail a sweep over it.
                warn!("cache unavailable, continuing without: {err}");
                None
            }
        }
    };

    let options = SweepOptions {
        workers: args.workers,
        cancel: None,
        cache,
        data_dir: args.data_dir,
    };

    let stdout = std::io::stdout();
    let mut emit = |record: &SweepRecord| {
        use std::io::Write;
        if let Ok(line) = serde_json::to_string(record) {
            let mut out = stdout.lock();
            let _ = writeln!(out, "{line}");
        }
    };

    match run_sweep(&config, &options, &mut emit) {
        Ok(_) => ExitCode::Ok,
        Err(err) => {
            eprintln!("ge-core: {err}");
            ExitCode::from_error(&err)
        }
    }
}

fn build_spec(digits: u32, k: Option<u64>) -> Result<PrecisionSpec, ExitCode> {
    let spec = match k {
        Some(k) => PrecisionSpec::with_truncation(digits, k),
        None => PrecisionSpec::new(digits),
    };
    spec.map_err(|err| {
        eprintln!("ge-core: {err}");
        ExitCode::from_error(&err)
    })
}

fn parse_tuple(
    epsilon: f64,
    palpha: f64,
    n_mean: f64,
    digits: u32,
    k: Option<u64>,
) -> Result<(Parameters, PrecisionSpec), ExitCode> {
    let params = Parameters::new(epsilon, palpha, n_mean).map_err(|err| {
        eprintln!("ge-core: {err}");
        ExitCode::from_error(&err)
    })?;
    let spec = build_spec(digits, k)?;
    Ok((params, spec))
}
