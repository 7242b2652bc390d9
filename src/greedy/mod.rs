//! Constructive greedy heuristics.
//!
//! Both solvers rank candidates by value density, defined once in
//! [`objective::marginal_density`](crate::objective::marginal_density):
//!
//! - [`GreedyAbsolute`]: densities are computed once against *all* items,
//!   sorted, and the knapsack is filled in a single pass. Fast, and blind to
//!   which items actually end up selected.
//! - [`GreedyRelative`]: one constructive run per start item; each step
//!   re-scores the remaining items against the current partial solution and
//!   takes the densest one that fits. The best run is returned.
//!
//! Neither solver uses randomness, so both are fully deterministic.

mod absolute;
mod relative;

pub use absolute::GreedyAbsolute;
pub use relative::GreedyRelative;
