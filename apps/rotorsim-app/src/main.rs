//! rotorsim command-line driver.
//!
//! Modes:
//! - `run`: simulate a scenario, print per-run statistics and save histories
//! - `show`: summarize a saved history file
//! - `gains`: tabulate the fuzzy proportional and integral gains
//! - `info`: print crate versions and defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rotorsim_core::prelude::*;
use rotorsim_fuzzy::prelude::*;
use rotorsim_record::{DEFAULT_HISTORY_PATH, load_history, save_history};
use rotorsim_sim::{ScenarioReport, run_scenario};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// DC motor speed control: bang-bang, PID and fuzzy PID side by side.
#[derive(Parser)]
#[command(name = "rotorsim", version, about)]
struct Cli {
    /// Log per-tick detail (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and save the rpm histories.
    Run(RunArgs),

    /// Summarize a saved history file.
    Show {
        /// History file to read.
        #[arg(default_value = DEFAULT_HISTORY_PATH)]
        path: PathBuf,
    },

    /// Print the fuzzy gains over a range of errors.
    Gains {
        /// Error increment between rows.
        #[arg(long, default_value_t = 10.0)]
        step: f64,
    },

    /// Print crate information.
    Info,
}

#[derive(clap::Args, Default)]
struct RunArgs {
    /// Scenario TOML file. Without one, the standard three-run comparison is used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target speed for every run [default: 70].
    #[arg(short, long)]
    target_rpm: Option<f64>,

    /// Ticks per run [default: 20].
    #[arg(short, long)]
    max_iter: Option<u32>,

    /// Which rpm value each tick records.
    #[arg(long, value_enum)]
    sample: Option<SampleArg>,

    /// History output file [default: rpm_history.json].
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run one simulation at a time instead of one thread per run.
    #[arg(long)]
    sequential: bool,

    /// Skip writing the history file.
    #[arg(long)]
    no_save: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SampleArg {
    /// rpm at the end of the tick.
    AfterDrag,
    /// rpm before the slowing factor is applied.
    BeforeDrag,
}

impl From<SampleArg> for SamplePoint {
    fn from(arg: SampleArg) -> Self {
        match arg {
            SampleArg::AfterDrag => Self::AfterDrag,
            SampleArg::BeforeDrag => Self::BeforeDrag,
        }
    }
}

const DEFAULT_TARGET_RPM: f64 = 70.0;
const DEFAULT_MAX_ITER: u32 = 20;

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn scenario_from_args(args: &RunArgs) -> Result<ScenarioConfig> {
    let mut scenario = match &args.config {
        Some(path) => ScenarioConfig::from_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::standard(
            args.target_rpm.unwrap_or(DEFAULT_TARGET_RPM),
            args.max_iter.unwrap_or(DEFAULT_MAX_ITER),
        ),
    };
    for run in &mut scenario.runs {
        if let Some(target) = args.target_rpm {
            run.motor.target_rpm = target;
        }
        if let Some(limit) = args.max_iter {
            run.motor.iterations_limit = limit;
        }
        if let Some(sample) = args.sample {
            run.motor.sample_point = sample.into();
        }
    }
    if let Some(output) = &args.output {
        scenario.output.clone_from(output);
    }
    if args.sequential {
        scenario.parallel = false;
    }
    scenario.validate()?;
    Ok(scenario)
}

fn print_report(report: &ScenarioReport) {
    println!(
        "{:<18} {:>6} {:>10} {:>10} {:>8} {:>10} {:>10} {:>9}",
        "run", "ticks", "final", "peak", "reached", "overshoot", "mean |e|", "fallback"
    );
    for run in &report.runs {
        let label = display_label(&run.name);
        match run.stats {
            Some(stats) => println!(
                "{:<18} {:>6} {:>10.3} {:>10.3} {:>8} {:>10.3} {:>10.3} {:>9}",
                label,
                stats.ticks,
                stats.final_rpm,
                stats.peak_rpm,
                stats
                    .first_reach
                    .map_or_else(|| "-".to_owned(), |tick| tick.to_string()),
                stats.overshoot,
                stats.mean_abs_error,
                stats.fallback_ticks,
            ),
            None => println!("{label:<18} {:>6}", 0),
        }
    }
}

fn run_simulations(args: &RunArgs) -> Result<()> {
    let scenario = scenario_from_args(args)?;
    let report = run_scenario(&scenario)?;
    print_report(&report);

    if !args.no_save {
        save_history(&report.histories(), &scenario.output)
            .with_context(|| format!("saving history to {}", scenario.output.display()))?;
        info!(path = %scenario.output.display(), "histories written");
        println!("\nhistory: {}", scenario.output.display());
    }
    Ok(())
}

fn run_show(path: &Path) -> Result<()> {
    let histories =
        load_history(path).with_context(|| format!("reading history {}", path.display()))?;
    println!("{} ({} runs)", path.display(), histories.len());
    for (name, history) in histories.iter() {
        let first = history.as_slice().first().copied().unwrap_or(f64::NAN);
        let last = history.last().unwrap_or(f64::NAN);
        println!(
            "  {:<18} {:>4} samples  first={first:.3}  last={last:.3}",
            display_label(name),
            history.len()
        );
    }
    Ok(())
}

/// Largest table `gains` will print.
const MAX_GAIN_ROWS: u32 = 10_000;

/// Index of the last row of the gain table: rows cover `0, step, .. <= 100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn last_gain_row(step: f64) -> Result<u32> {
    anyhow::ensure!(step.is_finite() && step > 0.0, "--step must be positive, got {step}");
    let last = (100.0 / step).floor();
    anyhow::ensure!(
        last < f64::from(MAX_GAIN_ROWS),
        "--step {step} gives more than {MAX_GAIN_ROWS} rows"
    );
    // finite, non-negative and below MAX_GAIN_ROWS
    Ok(last as u32)
}

fn run_gains(step: f64) -> Result<()> {
    let last = last_gain_row(step)?;
    let mut kp = FuzzyGainController::proportional()?;
    let mut ki = FuzzyGainController::integral()?;
    println!("{:>8} {:>10} {:>10}", "error", "k_p", "k_i");
    for row in 0..=last {
        let error = f64::from(row) * step;
        println!(
            "{error:>8.2} {:>10.4} {:>10.4}",
            kp.get_gain(error).value(),
            ki.get_gain(error).value()
        );
    }
    Ok(())
}

fn run_info() {
    let version = env!("CARGO_PKG_VERSION");
    println!("rotorsim v{version}");
    println!();
    println!("crates:");
    println!("  rotorsim-core    {version}");
    println!("  rotorsim-fuzzy   {version}");
    println!("  rotorsim-motor   {version}");
    println!("  rotorsim-record  {version}");
    println!("  rotorsim-sim     {version}");
    println!();
    let motor = MotorConfig::default();
    println!(
        "motor defaults: voltage={} current={} radius={} mass={} slowing_factor={}",
        motor.voltage, motor.current, motor.radius, motor.mass, motor.slowing_factor
    );
    println!("run defaults: target_rpm={DEFAULT_TARGET_RPM} max_iter={DEFAULT_MAX_ITER}");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Run(args)) => run_simulations(&args),
        Some(Commands::Show { path }) => run_show(&path),
        Some(Commands::Gains { step }) => run_gains(step),
        Some(Commands::Info) => {
            run_info();
            Ok(())
        }
        // Default: the standard comparison
        None => run_simulations(&RunArgs::default()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
