//! Repeated independent GA runs with aggregate statistics.
//!
//! Each trial gets its own seed, drawn up front from the batch seed, so
//! trials share nothing but the read-only instance and the batch result does
//! not depend on the order (or thread) in which trials execute.

use super::config::GaConfig;
use super::runner::{GaResult, GeneticSolver};
use crate::error::{QkpError, Result};
use crate::instance::Instance;
use crate::random::{derive_seeds, resolve_seed};
use crate::solution::Solution;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Configuration for a batch of GA trials.
///
/// `ga.seed` seeds the batch; every trial runs `ga` with its own derived
/// seed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialConfig {
    /// Per-trial GA parameters.
    pub ga: GaConfig,

    /// Number of independent trials.
    pub num_trials: usize,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            num_trials: 50,
        }
    }
}

impl TrialConfig {
    pub fn new(ga: GaConfig, num_trials: usize) -> Self {
        Self { ga, num_trials }
    }

    /// Sets the number of trials.
    pub fn with_num_trials(mut self, n: usize) -> Self {
        self.num_trials = n;
        self
    }

    /// Validates the batch and the per-trial GA configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_trials == 0 {
            return Err(QkpError::InvalidConfig(
                "num_trials must be at least 1".into(),
            ));
        }
        self.ga.validate()
    }
}

/// Aggregated outcome of a trial batch.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSummary {
    /// Best fitness of each completed trial, in trial order.
    pub per_trial_best_fitness: Vec<f64>,

    /// Arithmetic mean of `per_trial_best_fitness` (0 when no trial completed).
    pub mean_fitness: f64,

    /// Population standard deviation of `per_trial_best_fitness`.
    pub std_dev: f64,

    /// Highest per-trial fitness.
    pub best_fitness: f64,

    /// Lowest per-trial fitness.
    pub worst_fitness: f64,

    /// Solution of the best trial (the first one on ties).
    pub best_solution: Solution,

    /// Seed of each completed trial, aligned with `per_trial_best_fitness`.
    pub seeds: Vec<u64>,

    /// Whether the batch was cancelled before every trial completed.
    pub cancelled: bool,
}

/// Runs the GA repeatedly and aggregates the per-trial best fitness.
pub struct TrialRunner;

impl TrialRunner {
    /// Runs all trials.
    pub fn run(instance: &Instance, config: &TrialConfig) -> Result<TrialSummary> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs all trials with an optional cancellation token.
    ///
    /// The flag is checked before each trial and, inside each trial, before
    /// each generation. Trials interrupted by cancellation are left out of
    /// the statistics.
    pub fn run_with_cancel(
        instance: &Instance,
        config: &TrialConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TrialSummary> {
        config.validate()?;

        let batch_seed = resolve_seed(config.ga.seed);
        let seeds = derive_seeds(batch_seed, config.num_trials);

        let run_trial = |trial: usize, seed: u64| -> Result<Option<GaResult>> {
            if is_cancelled(&cancel) {
                return Ok(None);
            }
            let ga = config.ga.clone().with_seed(seed);
            let result = GeneticSolver::run_with_cancel(instance, &ga, cancel.clone())?;
            if result.cancelled {
                return Ok(None);
            }
            tracing::info!(
                trial = trial + 1,
                best_fitness = result.best_fitness,
                "trial complete"
            );
            Ok(Some(result))
        };

        let outcomes = run_all(&seeds, config.ga.parallel, run_trial)?;

        let completed: Vec<(u64, GaResult)> = seeds
            .iter()
            .copied()
            .zip(outcomes)
            .filter_map(|(seed, r)| r.map(|r| (seed, r)))
            .collect();
        let cancelled = completed.len() < config.num_trials;

        let summary = summarize(instance, completed, cancelled);
        tracing::info!(
            trials = summary.per_trial_best_fitness.len(),
            mean_fitness = summary.mean_fitness,
            best_fitness = summary.best_fitness,
            "trials finished"
        );
        Ok(summary)
    }
}

/// Runs `num_trials` trials of a default-configured GA with the given
/// population size and generation count.
///
/// # Examples
///
/// ```
/// use qkp_heur::{Instance, InteractionMatrix};
/// use qkp_heur::ga::run_trials;
///
/// let pairs = InteractionMatrix::from_pairs(2, &[(0, 1, 100.0)]).unwrap();
/// let instance = Instance::new(vec![5.0, 5.0], vec![10.0, 10.0], pairs, 8.0).unwrap();
/// let summary = run_trials(&instance, 4, 5, 3).unwrap();
/// assert_eq!(summary.per_trial_best_fitness, vec![10.0, 10.0, 10.0]);
/// assert_eq!(summary.mean_fitness, 10.0);
/// ```
pub fn run_trials(
    instance: &Instance,
    population_size: usize,
    generations: usize,
    num_trials: usize,
) -> Result<TrialSummary> {
    let ga = GaConfig::default()
        .with_population_size(population_size)
        .with_max_generations(generations);
    TrialRunner::run(instance, &TrialConfig::new(ga, num_trials))
}

fn is_cancelled(cancel: &Option<Arc<AtomicBool>>) -> bool {
    cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

#[cfg(feature = "parallel")]
fn run_all<F>(seeds: &[u64], parallel: bool, run_trial: F) -> Result<Vec<Option<GaResult>>>
where
    F: Fn(usize, u64) -> Result<Option<GaResult>> + Sync,
{
    use rayon::prelude::*;

    if parallel {
        seeds
            .par_iter()
            .enumerate()
            .map(|(trial, &seed)| run_trial(trial, seed))
            .collect()
    } else {
        seeds
            .iter()
            .enumerate()
            .map(|(trial, &seed)| run_trial(trial, seed))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all<F>(seeds: &[u64], _parallel: bool, run_trial: F) -> Result<Vec<Option<GaResult>>>
where
    F: Fn(usize, u64) -> Result<Option<GaResult>>,
{
    seeds
        .iter()
        .enumerate()
        .map(|(trial, &seed)| run_trial(trial, seed))
        .collect()
}

fn summarize(
    instance: &Instance,
    completed: Vec<(u64, GaResult)>,
    cancelled: bool,
) -> TrialSummary {
    let per_trial_best_fitness: Vec<f64> = completed.iter().map(|(_, r)| r.best_fitness).collect();
    let seeds: Vec<u64> = completed.iter().map(|(s, _)| *s).collect();

    let count = per_trial_best_fitness.len();
    let (mean_fitness, std_dev) = if count == 0 {
        (0.0, 0.0)
    } else {
        let mean = per_trial_best_fitness.iter().sum::<f64>() / count as f64;
        let var = per_trial_best_fitness
            .iter()
            .map(|f| (f - mean) * (f - mean))
            .sum::<f64>()
            / count as f64;
        (mean, var.sqrt())
    };

    let best_fitness = per_trial_best_fitness
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let worst_fitness = per_trial_best_fitness
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);

    let best_solution = completed
        .into_iter()
        .map(|(_, r)| r)
        .reduce(|best, r| if r.best_fitness > best.best_fitness { r } else { best })
        .map(|r| r.best)
        .unwrap_or_else(|| Solution::empty(instance.num_items()));

    TrialSummary {
        per_trial_best_fitness,
        mean_fitness,
        std_dev,
        best_fitness: if count == 0 { 0.0 } else { best_fitness },
        worst_fitness: if count == 0 { 0.0 } else { worst_fitness },
        best_solution,
        seeds,
        cancelled,
    }
}
