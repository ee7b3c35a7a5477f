//! Cross-validation, sampling checks and timing sweeps over one generated
//! data set, with results collected into a [`Report`].
//!
//! Every loop works on prefixes of the data set so that small and large
//! inputs share the same points.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hull2::pointgen::{generate_points, GenCfg, ReplayToken};
use hull2::{akl_toussaint_hull, sample_subset, validate_subset, Algorithm, Hull, Point};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::provenance;

/// Prefix sizes grow by a random step from this range.
const PREFIX_STEP: std::ops::RangeInclusive<usize> = 5..=100;

/// Whole microseconds, saturating at `u64::MAX`.
pub fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// One timed call.
#[derive(Clone, Debug, Serialize)]
pub struct Sample {
    pub algo: String,
    pub n: usize,
    pub micros: u64,
    /// Outcome of the check that followed the call, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
}

/// Collector for harness results, passed `&mut` into every loop.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub seed: u64,
    pub samples: Vec<Sample>,
}

impl Report {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            capacity,
            seed,
            samples: Vec::new(),
        }
    }

    pub fn record(&mut self, algo: &str, n: usize, elapsed: Duration, matches: Option<bool>) {
        let micros = micros(elapsed);
        match matches {
            Some(false) => tracing::warn!(algo, n, micros, matches = false, "mismatch"),
            Some(true) => tracing::info!(algo, n, micros, matches = true, "checked"),
            None => tracing::info!(algo, n, micros, "timed"),
        }
        self.samples.push(Sample {
            algo: algo.to_string(),
            n,
            micros,
            matches,
        });
    }

    pub fn mismatches(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.matches == Some(false))
            .count()
    }

    /// Pretty JSON plus a provenance sidecar.
    #[track_caller]
    pub fn write(&self, path: &Path, command: &str, params: serde_json::Value) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        let sidecar = provenance::write_sidecar(path, command, params)?;
        tracing::info!(report = %path.display(), sidecar = %sidecar.display(), "report written");
        Ok(())
    }
}

/// Generate `capacity` points in general position from `seed`.
pub fn dataset(capacity: usize, seed: u64, collinear_threshold: f64) -> Result<Vec<Point>> {
    let cfg = GenCfg {
        count: capacity,
        collinear_threshold,
        ..GenCfg::default()
    };
    let start = Instant::now();
    let points = generate_points(cfg, ReplayToken::new(seed)).with_context(|| {
        format!("could not place {capacity} points in general position (seed {seed})")
    })?;
    tracing::info!(
        capacity,
        seed,
        millis = millis(start.elapsed()),
        "dataset generated"
    );
    Ok(points)
}

/// Run `algo` once and measure it.
pub fn timed(algo: Algorithm, points: &[Point]) -> Result<(Hull, Duration)> {
    let start = Instant::now();
    let hull = algo
        .compute(points)
        .with_context(|| format!("{algo} on {} points", points.len()))?;
    Ok((hull, start.elapsed()))
}

/// Step RNG for prefix sizes; independent of the data set draw.
fn step_rng(seed: u64) -> StdRng {
    ReplayToken::new(seed).advance().to_std_rng()
}

/// Compare `algo` against `oracle` on growing prefixes of `dataset`.
///
/// Returns the number of prefixes where the hulls differ.
pub fn cross_validate(
    dataset: &[Point],
    oracle: Algorithm,
    algo: Algorithm,
    seed: u64,
    report: &mut Report,
) -> Result<usize> {
    let mut rng = step_rng(seed);
    let mut failures = 0;
    let mut n = rng.gen_range(PREFIX_STEP);
    while n < dataset.len() {
        let points = &dataset[..n];
        let (expected, t_oracle) = timed(oracle, points)?;
        report.record(oracle.name(), n, t_oracle, None);
        let (hull, t_algo) = timed(algo, points)?;
        let matches = hull.is_rotation_of(&expected);
        report.record(algo.name(), n, t_algo, Some(matches));
        if !matches {
            failures += 1;
            tracing::debug!(expected = ?expected.points(), got = ?hull.points(), "hulls differ");
        }
        n += rng.gen_range(PREFIX_STEP);
    }
    Ok(failures)
}

/// Sample growing prefixes with increasing strip counts and check each sample.
///
/// Returns the number of samples that failed [`validate_subset`].
pub fn check_sampling(dataset: &[Point], seed: u64, report: &mut Report) -> Result<usize> {
    let mut rng = step_rng(seed);
    let mut failures = 0;
    let mut n = rng.gen_range(PREFIX_STEP);
    while n < dataset.len() {
        let points = &dataset[..n];
        let exact = akl_toussaint_hull(points)?;
        let k_step = 1..=(n / 2).max(1);
        let mut k = rng.gen_range(k_step.clone());
        while k < n {
            let start = Instant::now();
            let sample = sample_subset(points, k).with_context(|| format!("sampling n={n} k={k}"))?;
            let elapsed = start.elapsed();
            let approx = akl_toussaint_hull(&sample)
                .with_context(|| format!("approximate hull n={n} k={k}"))?;
            let ok = validate_subset(points, &sample, &exact, &approx);
            tracing::debug!(n, k, sample = sample.len(), approx = approx.len(), "sampled");
            report.record("sample_subset", n, elapsed, Some(ok));
            if !ok {
                failures += 1;
            }
            k += rng.gen_range(k_step.clone());
        }
        n += rng.gen_range(PREFIX_STEP);
    }
    Ok(failures)
}

/// Time each algorithm on prefixes `step, 2*step, ...` below the data set size.
///
/// An algorithm stops once its accumulated running time reaches `budget`.
pub fn sweep(
    dataset: &[Point],
    algos: &[Algorithm],
    step: usize,
    budget: Duration,
    report: &mut Report,
) -> Result<()> {
    // a prefix needs at least three points
    let step = step.max(3);
    for &algo in algos {
        let _span = tracing::info_span!("sweep", algo = algo.name()).entered();
        let mut spent = Duration::ZERO;
        let mut n = step;
        while n < dataset.len() {
            let (_, elapsed) = timed(algo, &dataset[..n])?;
            report.record(algo.name(), n, elapsed, None);
            spent += elapsed;
            if spent >= budget {
                tracing::info!(n, spent_secs = spent.as_secs(), "time budget used up");
                break;
            }
            n += step;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fast_algorithms_match_their_oracles() {
        let data = dataset(300, 5, 1.0).unwrap();
        let mut report = Report::new(300, 5);
        let failures =
            cross_validate(&data, Algorithm::DivideAndConquer, Algorithm::Torch, 5, &mut report)
                .unwrap();
        assert_eq!(failures, 0);
        assert_eq!(report.mismatches(), 0);
        assert!(report.samples.iter().all(|s| s.n >= 5 && s.n < 300));
        // oracle and candidate alternate
        assert_eq!(report.samples.len() % 2, 0);
    }

    #[test]
    fn sweep_covers_each_prefix_per_algorithm() {
        let data = dataset(350, 9, 0.0).unwrap();
        let mut report = Report::new(350, 9);
        let algos = [Algorithm::AklToussaint, Algorithm::TorchOnFiltered];
        sweep(&data, &algos, 100, Duration::from_secs(60), &mut report).unwrap();
        let sizes: Vec<(String, usize)> =
            report.samples.iter().map(|s| (s.algo.clone(), s.n)).collect();
        let expected: Vec<(String, usize)> = algos
            .iter()
            .flat_map(|a| [100, 200, 300].map(|n| (a.name().to_string(), n)))
            .collect();
        assert_eq!(sizes, expected);
    }

    #[test]
    fn zero_budget_stops_after_first_size() {
        let data = dataset(350, 9, 0.0).unwrap();
        let mut report = Report::new(350, 9);
        sweep(&data, &[Algorithm::Torch], 100, Duration::ZERO, &mut report).unwrap();
        assert_eq!(report.samples.len(), 1);
    }

    #[test]
    fn sampling_loop_records_every_sample() {
        let data = dataset(120, 2, 1.0).unwrap();
        let mut report = Report::new(120, 2);
        let failures = check_sampling(&data, 2, &mut report).unwrap();
        assert!(!report.samples.is_empty());
        assert_eq!(failures, report.mismatches());
    }

    #[test]
    fn durations_saturate_instead_of_wrapping() {
        assert_eq!(micros(Duration::from_micros(1_500)), 1_500);
        assert_eq!(millis(Duration::from_micros(1_500)), 1);
        assert_eq!(micros(Duration::MAX), u64::MAX);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn report_serializes_with_sidecar() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.json");
        let mut report = Report::new(10, 1);
        report.record("torch", 5, Duration::from_micros(42), None);
        report.record("naive", 5, Duration::from_micros(7), Some(false));
        report
            .write(&path, "bench", serde_json::json!({"step": 100}))
            .unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(parsed["samples"][0]["micros"], 42);
        assert!(parsed["samples"][0].get("matches").is_none());
        assert_eq!(parsed["samples"][1]["matches"], false);
        assert!(dir.path().join("bench.provenance.json").exists());
    }
}
