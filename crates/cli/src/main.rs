use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hull2::{akl_toussaint_hull, Algorithm};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod dump;
mod harness;
mod plot;
mod provenance;

use harness::Report;

#[derive(Parser)]
#[command(name = "hull")]
#[command(version = hull2::VERSION)]
#[command(about = "Run, cross-check and time the planar convex hull algorithms")]
struct Cmd {
    /// Log filter, e.g. `info`, `debug` or `cli=trace`
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    action: Action,
}

/// Data set shared by the generating subcommands.
#[derive(Args, Clone, Copy, Debug)]
struct DataArgs {
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Minimum |determinant| for every point triple; 0 skips the check
    #[arg(long, default_value_t = 1.0)]
    collinear_threshold: f64,
}

#[derive(Subcommand)]
enum Action {
    /// Generate points, compute one hull, optionally dump the result
    Run {
        #[arg(long, default_value = "akl_toussaint")]
        algo: Algorithm,
        #[arg(long, default_value_t = 500)]
        count: usize,
        #[command(flatten)]
        data: DataArgs,
        /// Text dump of points and hull
        #[arg(long)]
        dump: Option<PathBuf>,
        /// Viewer binary of the points (f32 pairs)
        #[arg(long)]
        bin: Option<PathBuf>,
    },
    /// Compare an algorithm against an oracle on growing prefixes
    Validate {
        #[arg(long, default_value = "divide_and_conquer")]
        oracle: Algorithm,
        #[arg(long)]
        algo: Algorithm,
        #[arg(long, default_value_t = 1000)]
        capacity: usize,
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Check strip sampling on growing prefixes and strip counts
    Sample {
        #[arg(long, default_value_t = 1000)]
        capacity: usize,
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Time algorithms on prefixes growing by `step`
    Bench {
        #[arg(long, default_value_t = 10_000)]
        capacity: usize,
        #[arg(long, default_value_t = 100)]
        step: usize,
        /// Per-algorithm time budget
        #[arg(long, default_value_t = 180)]
        budget_secs: u64,
        /// Repeat to pick algorithms; all when omitted
        #[arg(long)]
        algo: Vec<Algorithm>,
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print a text dump as a terminal scatter plot
    Plot {
        #[arg(long)]
        input: PathBuf,
        /// Compute the hull when the dump has none
        #[arg(long)]
        hull: bool,
        #[arg(long, default_value_t = 72)]
        width: usize,
        #[arg(long, default_value_t = 32)]
        height: usize,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let filter = EnvFilter::try_new(&cmd.log).with_context(|| format!("bad --log `{}`", cmd.log))?;
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .init();
    match cmd.action {
        Action::Run {
            algo,
            count,
            data,
            dump,
            bin,
        } => run(algo, count, data, dump, bin),
        Action::Validate {
            oracle,
            algo,
            capacity,
            data,
            report,
        } => validate(oracle, algo, capacity, data, report),
        Action::Sample {
            capacity,
            data,
            report,
        } => sample(capacity, data, report),
        Action::Bench {
            capacity,
            step,
            budget_secs,
            algo,
            data,
            report,
        } => bench(capacity, step, budget_secs, algo, data, report),
        Action::Plot {
            input,
            hull,
            width,
            height,
        } => show(input, hull, width, height),
    }
}

fn run(
    algo: Algorithm,
    count: usize,
    data: DataArgs,
    dump: Option<PathBuf>,
    bin: Option<PathBuf>,
) -> Result<()> {
    let points = harness::dataset(count, data.seed, data.collinear_threshold)?;
    let (hull, elapsed) = harness::timed(algo, &points)?;
    tracing::info!(
        algo = algo.name(),
        n = count,
        micros = harness::micros(elapsed),
        vertices = hull.len(),
        "hull computed"
    );
    if let Some(path) = dump {
        dump::write_text(&path, &points, Some(hull.points()))?;
        tracing::info!(path = %path.display(), "text dump written");
    }
    if let Some(path) = bin {
        dump::write_viewer(&path, &points)?;
        tracing::info!(path = %path.display(), "viewer binary written");
    }
    Ok(())
}

fn validate(
    oracle: Algorithm,
    algo: Algorithm,
    capacity: usize,
    data: DataArgs,
    report_path: Option<PathBuf>,
) -> Result<()> {
    tracing::info!(oracle = oracle.name(), algo = algo.name(), capacity, "validate");
    let points = harness::dataset(capacity, data.seed, data.collinear_threshold)?;
    let mut report = Report::new(capacity, data.seed);
    let failures = harness::cross_validate(&points, oracle, algo, data.seed, &mut report)?;
    if let Some(path) = report_path {
        let params = json!({
            "oracle": oracle.name(),
            "algo": algo.name(),
            "capacity": capacity,
            "seed": data.seed,
            "collinear_threshold": data.collinear_threshold,
        });
        report.write(&path, "validate", params)?;
    }
    if failures > 0 {
        bail!("{algo} disagreed with {oracle} on {failures} prefixes");
    }
    tracing::info!("hulls match on every prefix");
    Ok(())
}

fn sample(capacity: usize, data: DataArgs, report_path: Option<PathBuf>) -> Result<()> {
    let points = harness::dataset(capacity, data.seed, data.collinear_threshold)?;
    let mut report = Report::new(capacity, data.seed);
    let failures = harness::check_sampling(&points, data.seed, &mut report)?;
    if let Some(path) = report_path {
        let params = json!({
            "capacity": capacity,
            "seed": data.seed,
            "collinear_threshold": data.collinear_threshold,
        });
        report.write(&path, "sample", params)?;
    }
    // An approximate hull may keep a sample point that is interior to the
    // full set, so failures are reported but not fatal.
    tracing::info!(
        checks = report.samples.len(),
        failures,
        "sampling checks done"
    );
    Ok(())
}

fn bench(
    capacity: usize,
    step: usize,
    budget_secs: u64,
    algos: Vec<Algorithm>,
    data: DataArgs,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let algos = if algos.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        algos
    };
    let points = harness::dataset(capacity, data.seed, data.collinear_threshold)?;
    let mut report = Report::new(capacity, data.seed);
    harness::sweep(
        &points,
        &algos,
        step,
        Duration::from_secs(budget_secs),
        &mut report,
    )?;
    if let Some(path) = report_path {
        let names: Vec<&str> = algos.iter().map(|a| a.name()).collect();
        let params = json!({
            "capacity": capacity,
            "step": step,
            "budget_secs": budget_secs,
            "algos": names,
            "seed": data.seed,
            "collinear_threshold": data.collinear_threshold,
        });
        report.write(&path, "bench", params)?;
    }
    Ok(())
}

fn show(input: PathBuf, compute_hull: bool, width: usize, height: usize) -> Result<()> {
    let mut dump = dump::read_text(&input)?;
    if dump.hull.is_none() && compute_hull {
        let hull = akl_toussaint_hull(&dump.points)
            .with_context(|| format!("hull of {}", input.display()))?;
        dump.hull = Some(hull.into_points());
    }
    tracing::info!(
        points = dump.points.len(),
        hull = dump.hull.as_ref().map_or(0, Vec::len),
        "plot"
    );
    print!(
        "{}",
        plot::render(&dump.points, dump.hull.as_deref(), width, height)
    );
    Ok(())
}
