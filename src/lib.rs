//! Heuristics for the quadratic knapsack problem (QKP).
//!
//! A QKP instance has items with a weight and a linear value, plus a
//! symmetric pairwise value for every unordered pair of items. A selection
//! earns the linear values of its items and the pairwise value of every pair
//! it contains, subject to the total weight staying within the capacity.
//!
//! Three solvers are provided:
//!
//! - **Absolute greedy** ([`greedy::GreedyAbsolute`]): ranks items once by
//!   their density against every other item, then fills in that order.
//! - **Relative greedy** ([`greedy::GreedyRelative`]): starts from each item
//!   in turn and repeatedly adds the item with the best density relative to
//!   what is already packed. Keeps the best of all starts.
//! - **Genetic algorithm** ([`ga::GeneticSolver`]): tournament selection,
//!   intersection crossover, and adaptive drop mutation, with every offspring
//!   repaired into a feasible, maximal selection. [`ga::TrialRunner`]
//!   repeats independent runs and reports aggregate statistics.
//!
//! Instances are read and written in the classic benchmark text layout by
//! the [`format`] module.
//!
//! # Example
//!
//! ```
//! use qkp_heur::{Instance, InteractionMatrix};
//! use qkp_heur::greedy::{GreedyAbsolute, GreedyRelative};
//! use qkp_heur::ga::{GaConfig, GeneticSolver};
//!
//! let pairs = InteractionMatrix::from_pairs(2, &[(0, 1, 100.0)]).unwrap();
//! let instance = Instance::new(vec![5.0, 5.0], vec![10.0, 10.0], pairs, 8.0).unwrap();
//!
//! assert_eq!(GreedyAbsolute::solve(&instance).value(), 10.0);
//! assert_eq!(GreedyRelative::solve(&instance).1, 10.0);
//!
//! let config = GaConfig::for_instance(&instance).with_seed(42);
//! let result = GeneticSolver::run(&instance, &config).unwrap();
//! assert_eq!(result.best_fitness, 10.0);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluates populations, relative-greedy starts, and trials
//!   on the rayon thread pool. Results are identical with and without it.
//! - `serde`: `Serialize`/`Deserialize` for instances, solutions, configs,
//!   and results.

pub mod error;
pub mod format;
pub mod ga;
pub mod greedy;
pub mod instance;
pub mod objective;
pub mod random;
pub mod solution;

pub use error::{QkpError, Result};
pub use instance::{ConstraintType, Instance, InteractionMatrix, Item};
pub use solution::Solution;
