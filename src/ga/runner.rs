//! GA evolutionary loop execution.
//!
//! [`GeneticSolver`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover/mutation → repair →
//! elitist replacement → repeat for a fixed number of generations.

use super::config::GaConfig;
use super::operators;
use super::types::Chromosome;
use crate::error::Result;
use crate::instance::Instance;
use crate::objective::evaluate_weight;
use crate::random::{create_rng, resolve_seed};
use crate::solution::Solution;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number; `0` is the initial population.
    pub generation: usize,

    /// Best fitness found so far (running maximum over all generations).
    pub best_fitness: f64,

    /// Weight of the best-so-far chromosome.
    pub best_weight: f64,

    /// Mean fitness of this generation's population.
    pub mean_fitness: f64,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The best solution found during the entire run.
    pub best: Solution,

    /// Fitness of `best` (its objective value; it is always feasible).
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Seed the run actually used, for replaying unseeded runs.
    pub seed: u64,

    /// Per-generation statistics, starting with the initial population.
    pub history: Vec<GenerationStats>,
}

impl GaResult {
    /// Best-so-far fitness after each generation (initial population first).
    pub fn fitness_history(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_fitness).collect()
    }
}

/// Executes the knapsack GA.
///
/// # Usage
///
/// ```
/// use qkp_heur::{Instance, InteractionMatrix};
/// use qkp_heur::ga::{GaConfig, GeneticSolver};
///
/// let pairs = InteractionMatrix::from_pairs(3, &[(0, 1, 4.0), (1, 2, 6.0)]).unwrap();
/// let instance = Instance::new(vec![2.0, 3.0, 4.0], vec![5.0, 1.0, 3.0], pairs, 7.0).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(20)
///     .with_seed(42);
///
/// let result = GeneticSolver::run(&instance, &config).unwrap();
/// assert!(result.best.weight() <= instance.capacity());
/// assert_eq!(result.generations, 20);
/// ```
pub struct GeneticSolver;

impl GeneticSolver {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// [`QkpError::InvalidConfig`](crate::QkpError::InvalidConfig) if the
    /// configuration does not validate.
    pub fn run(instance: &Instance, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop before starting the next generation and return the best
    /// solution found so far.
    pub fn run_with_cancel(
        instance: &Instance,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        config.validate()?;

        let seed = resolve_seed(config.seed);
        let mut rng = create_rng(seed);
        let pop_size = config.population_size;

        // 1. Initialize population
        let mut population: Vec<Chromosome> = (0..pop_size)
            .map(|_| Chromosome::new(operators::random_greedy(instance, &mut rng)))
            .collect();

        // 2. Evaluate initial population
        evaluate_population(instance, &mut population, config.parallel);

        // 3. Track best
        let mut best = find_best(&population).clone();
        let mut history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        history.push(stats(instance, 0, &best, &population));

        let mut generations = 0usize;
        let mut cancelled = false;

        // 4. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Slot 0 carries the best-ever chromosome from the second generation on.
            let elite_count = usize::from(gen > 0);
            let mut next_gen: Vec<Chromosome> = Vec::with_capacity(pop_size);
            if elite_count > 0 {
                next_gen.push(best.clone());
            }

            while next_gen.len() < pop_size {
                next_gen.push(Chromosome::new(breed(instance, config, &population, &mut rng)));
            }

            // Elites are already evaluated.
            evaluate_population(instance, &mut next_gen[elite_count..], config.parallel);

            for child in &next_gen[elite_count..] {
                if child.fitness() > best.fitness() {
                    best = child.clone();
                }
            }

            population = next_gen;
            generations = gen + 1;

            let gen_stats = stats(instance, generations, &best, &population);
            tracing::debug!(
                generation = generations,
                best_fitness = gen_stats.best_fitness,
                mean_fitness = gen_stats.mean_fitness,
                "generation complete"
            );
            history.push(gen_stats);
        }

        if cancelled {
            tracing::warn!(generations, "genetic run cancelled");
        }

        let best_fitness = best.fitness();
        Ok(GaResult {
            best: Solution::from_selection(instance, best.into_genes()),
            best_fitness,
            generations,
            cancelled,
            seed,
            history,
        })
    }
}

/// Builds one offspring: two tournament parents, then crossover with
/// probability `crossover_rate`, otherwise mutation of the first parent.
fn breed<R: Rng>(
    instance: &Instance,
    config: &GaConfig,
    population: &[Chromosome],
    rng: &mut R,
) -> Vec<bool> {
    let p1 = config.selection.select(population, rng);
    let p2 = config.selection.select(population, rng);

    if rng.random_range(0.0..1.0) < config.crossover_rate {
        operators::crossover(
            instance,
            population[p1].genes(),
            population[p2].genes(),
            rng,
        )
    } else {
        operators::mutate(instance, population[p1].genes(), rng)
    }
}

/// Evaluate all chromosomes in the slice.
#[cfg(feature = "parallel")]
fn evaluate_population(instance: &Instance, population: &mut [Chromosome], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        population
            .par_iter_mut()
            .for_each(|c| c.evaluate(instance));
    } else {
        for c in population.iter_mut() {
            c.evaluate(instance);
        }
    }
}

/// Evaluate all chromosomes in the slice.
#[cfg(not(feature = "parallel"))]
fn evaluate_population(instance: &Instance, population: &mut [Chromosome], _parallel: bool) {
    for c in population.iter_mut() {
        c.evaluate(instance);
    }
}

/// Find the chromosome with the highest fitness; the first one wins ties.
fn find_best(population: &[Chromosome]) -> &Chromosome {
    population
        .iter()
        .reduce(|best, c| if c.fitness() > best.fitness() { c } else { best })
        .expect("population must not be empty")
}

fn stats(
    instance: &Instance,
    generation: usize,
    best: &Chromosome,
    population: &[Chromosome],
) -> GenerationStats {
    let mean_fitness =
        population.iter().map(|c| c.fitness()).sum::<f64>() / population.len() as f64;
    GenerationStats {
        generation,
        best_fitness: best.fitness(),
        best_weight: evaluate_weight(instance, best.genes()),
        mean_fitness,
    }
}

// ============================================================================
// Tests
// ============================================================================
