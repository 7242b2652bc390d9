//! Genetic algorithm for the quadratic knapsack problem.
//!
//! Chromosomes are selection vectors. Every operator ends with a random-order
//! greedy repair, so the population only ever holds feasible selections and
//! fitness is simply the objective value.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, generations,
//!   tournament, crossover rate, seed)
//! - [`GeneticSolver`]: Executes the generational loop
//! - [`GaResult`]: Best solution with per-generation statistics
//! - [`TrialRunner`]: Independent repeated runs with aggregate statistics
//!
//! # Submodules
//!
//! - [`operators`]: Initialization, intersection crossover, adaptive drop
//!   mutation, and repair
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Julstrom (2005), "Greedy, Genetic, and Greedy Genetic Algorithms for the
//!   Quadratic Knapsack Problem"

mod config;
pub mod operators;
mod runner;
mod selection;
mod trials;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GenerationStats, GeneticSolver};
pub use selection::Tournament;
pub use trials::{run_trials, TrialConfig, TrialRunner, TrialSummary};
pub use types::{fitness, Chromosome};
