//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Tournament;
use crate::error::{QkpError, Result};
use crate::instance::Instance;

/// Configuration for the knapsack genetic algorithm.
///
/// # Defaults
///
/// ```
/// use qkp_heur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.selection.size, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use qkp_heur::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_max_generations(200)
///     .with_tournament_size(3)
///     .with_win_probability(0.8)
///     .with_crossover_rate(0.6)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes in every generation.
    pub population_size: usize,

    /// Number of generations to run. The loop always runs exactly this many
    /// unless cancelled.
    pub max_generations: usize,

    /// Parent selection.
    pub selection: Tournament,

    /// Probability of producing an offspring by crossover (0.0–1.0).
    ///
    /// Otherwise the offspring is a mutation of the first parent.
    pub crossover_rate: f64,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature. Offspring are always
    /// built sequentially from the single RNG, so results do not depend on
    /// this flag.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Tournament::default(),
            crossover_rate: 0.7,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sizes the run from the instance: `n` chromosomes for `10·n`
    /// generations.
    pub fn for_instance(instance: &Instance) -> Self {
        let n = instance.num_items().max(1);
        Self {
            population_size: n,
            max_generations: 10 * n,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament size `k`.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.selection.size = k;
        self
    }

    /// Sets the probability that a tournament returns its best contestant.
    pub fn with_win_probability(mut self, p: f64) -> Self {
        self.selection.win_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`QkpError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if self.selection.size < 2 {
            return Err(invalid("tournament size must be at least 2"));
        }
        if !(0.0..=1.0).contains(&self.selection.win_probability) {
            return Err(invalid("win_probability must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(invalid("crossover_rate must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> QkpError {
    QkpError::InvalidConfig(msg.to_string())
}
