//! Single-pass greedy fill by precomputed absolute density.

use crate::instance::Instance;
use crate::objective::{absolute_density, fits};
use crate::solution::Solution;

/// Sort-and-fill greedy using absolute densities.
///
/// The density of item `i` is `(value_i + Σ_j pair(i, j)) / weight_i` over
/// **every** other item `j`, computed once before filling. Items whose
/// interactions are mostly with items that never get selected are therefore
/// over-rated. This is a known approximation traded for an `O(n²)` total
/// cost; [`GreedyRelative`](super::GreedyRelative) is the adaptive variant.
///
/// # Examples
///
/// ```
/// use qkp_heur::{Instance, InteractionMatrix, greedy::GreedyAbsolute};
///
/// let pairs = InteractionMatrix::from_pairs(2, &[(0, 1, 100.0)]).unwrap();
/// let instance = Instance::new(vec![5.0, 5.0], vec![10.0, 10.0], pairs, 8.0).unwrap();
/// let solution = GreedyAbsolute::solve(&instance);
/// assert_eq!(solution.value(), 10.0);
/// ```
pub struct GreedyAbsolute;

impl GreedyAbsolute {
    /// Fills the knapsack in [`density_order`](Self::density_order), adding
    /// every item that still fits. No backtracking.
    pub fn solve(instance: &Instance) -> Solution {
        let mut selected = vec![false; instance.num_items()];
        let mut weight = 0.0;

        for i in Self::density_order(instance) {
            if fits(instance, &selected, weight, i) {
                selected[i] = true;
                weight += instance.weight(i);
            }
        }

        let solution = Solution::from_selection(instance, selected);
        tracing::debug!(
            value = solution.value(),
            weight = solution.weight(),
            items = solution.len(),
            "absolute greedy finished"
        );
        solution
    }

    /// Item ids sorted by absolute density, highest first.
    ///
    /// Equal densities keep ascending id order.
    pub fn density_order(instance: &Instance) -> Vec<usize> {
        let densities: Vec<f64> = (0..instance.num_items())
            .map(|i| absolute_density(instance, i))
            .collect();

        let mut order: Vec<usize> = (0..instance.num_items()).collect();
        order.sort_by(|&a, &b| densities[b].total_cmp(&densities[a]).then(a.cmp(&b)));
        order
    }
}
