//! code-reduce CLI
//!
//! Shrinks source files in place while an oracle command keeps reporting the
//! behavior of interest.
//!
//! # Usage
//!
//! ```bash
//! # Keep only what still makes the compiler crash
//! code-reduce --oracle './check.sh' --timeout 60 src/crash.py
//!
//! # YAML config, with a CLI override
//! code-reduce --config reduce.yaml --preset thorough src/crash.py src/crash.pyi
//! ```
//!
//! Exit status: 0 reduced, 2 nothing removed, 3 oracle never satisfied on the
//! original input, 4 cancelled, 1 any other error.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use code_reduce::config::reduce_config::parse_strategies;
use code_reduce::config::{ConfigResult, Preset, ReduceConfig, Validatable};
use code_reduce::{CancelFlag, ReduceError, ReductionReport, Reducer, ShellOracle, TreeSitterFrontend};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_REDUCED: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_NOTHING_REMOVED: u8 = 2;
const EXIT_NEVER_SATISFIED: u8 = 3;
const EXIT_CANCELLED: u8 = 4;

#[derive(Parser)]
#[command(name = "code-reduce")]
#[command(about = "Hierarchical program reducer - shrink a reproducer while an oracle still passes", long_about = None)]
struct Cli {
    /// Files to reduce in place
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// YAML configuration file (schema v1)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Oracle shell command; exit status 0 means "still reproduces"
    #[arg(short, long)]
    oracle: Option<String>,

    /// Directory the oracle runs in
    #[arg(short, long, default_value = ".")]
    workdir: PathBuf,

    /// Oracle timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Exit status the oracle returns when the behavior reproduces
    #[arg(long)]
    expect_exit: Option<i32>,

    /// Regex the oracle output must also match
    #[arg(long)]
    expect_output: Option<String>,

    /// Preset: fast, balanced, thorough
    #[arg(short, long)]
    preset: Option<String>,

    /// Strategy to run, in order (repeatable; overrides the preset)
    #[arg(short, long = "strategy")]
    strategies: Vec<String>,

    /// Stop after this many passes (0 = until fixpoint)
    #[arg(long)]
    max_passes: Option<usize>,

    /// Skip the whitespace tidy pass
    #[arg(long)]
    no_tidy: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    let Some(oracle_config) = config.oracle.as_ref() else {
        eprintln!("error: no oracle configured");
        return ExitCode::from(EXIT_FAILURE);
    };
    let oracle = match ShellOracle::from_config(oracle_config) {
        Ok(oracle) => oracle,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let cancel = CancelFlag::new();
    install_ctrl_c(cancel.clone());

    info!(preset = %config.preset, strategies = config.strategies.len(), files = cli.files.len(), "starting reduction");
    let mut reducer = Reducer::new(TreeSitterFrontend::new(), oracle, config)
        .with_workdir(&cli.workdir)
        .with_cancel(cancel);

    match reducer.run(&cli.files) {
        Ok(report) => {
            print_report(&report, cli.json);
            if report.reduced() {
                ExitCode::from(EXIT_REDUCED)
            } else {
                ExitCode::from(EXIT_NOTHING_REMOVED)
            }
        }
        Err(ReduceError::OracleNeverSatisfied) => {
            eprintln!("error: {}", ReduceError::OracleNeverSatisfied);
            ExitCode::from(EXIT_NEVER_SATISFIED)
        }
        Err(ReduceError::Cancelled) => {
            eprintln!("cancelled; files hold the last accepted state");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// File values first, then CLI overrides
fn build_config(cli: &Cli) -> ConfigResult<ReduceConfig> {
    let mut config = match &cli.config {
        Some(path) => ReduceConfig::from_yaml(path)?,
        None => ReduceConfig::default(),
    };

    if let Some(name) = &cli.preset {
        let preset = Preset::from_str(name)?;
        config.preset = preset;
        config.strategies = preset.strategies();
    }
    if !cli.strategies.is_empty() {
        config.strategies = parse_strategies(&cli.strategies)?;
    }
    if let Some(command) = &cli.oracle {
        config = config.with_command(command.clone());
    }
    if let Some(oracle) = &mut config.oracle {
        if let Some(secs) = cli.timeout {
            oracle.timeout_secs = Some(secs);
        }
        if let Some(code) = cli.expect_exit {
            oracle.success_exit_code = code;
        }
        if let Some(pattern) = &cli.expect_output {
            oracle.output_pattern = Some(pattern.clone());
        }
    }
    if let Some(max_passes) = cli.max_passes {
        config.max_passes = max_passes;
    }
    if cli.no_tidy {
        config.tidy = false;
    }

    config.validate()?;
    Ok(config)
}

/// Flip the cancel flag on Ctrl-C; the reducer stops before its next trial
fn install_ctrl_c(cancel: CancelFlag) {
    let spawned = thread::Builder::new().name("ctrl-c".to_string()).spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "cannot listen for Ctrl-C");
                return;
            }
        };
        runtime.block_on(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping after the current trial");
                cancel.cancel();
            }
        });
    });
    if let Err(e) = spawned {
        warn!(error = %e, "cannot listen for Ctrl-C");
    }
}

fn print_report(report: &ReductionReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("error: cannot serialize report: {}", e),
        }
        return;
    }

    println!("passes:   {}", report.passes);
    println!(
        "trials:   {} ({} accepted, {} rejected, {} oracle errors)",
        report.trials, report.accepted, report.rejected, report.oracle_errors
    );
    for (strategy, removed) in &report.removed_by_strategy {
        println!("  {:<13} {} removed", strategy, removed);
    }
    println!(
        "size:     {} -> {} non-whitespace bytes ({:.1}% removed)",
        report.size_before,
        report.size_after,
        report.reduction_ratio() * 100.0
    );
    if let Some(false) = report.final_verified {
        println!("warning:  oracle did not pass on the final output");
    }
}
