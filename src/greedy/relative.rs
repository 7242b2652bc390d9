//! Multi-start greedy with adaptive (relative) density.

use crate::instance::Instance;
use crate::objective::{fits, marginal_density};
use crate::solution::Solution;

/// Multi-start constructive greedy.
///
/// For each start item, the knapsack is seeded with that item and then
/// grown one item at a time: every remaining item that fits is scored by its
/// density *relative to the items already chosen*, and the densest one is
/// added. The best of the `n` runs is returned.
///
/// # Complexity
///
/// `O(n³)` density evaluations in the worst case (n starts × n steps × n
/// candidates), each `O(|selected|)`. Intended for instances with up to a
/// few hundred items.
pub struct GreedyRelative;

impl GreedyRelative {
    /// Runs every start and returns the best solution with its value.
    ///
    /// The running best starts as the empty selection (value 0) and is only
    /// replaced by a strictly better run, so ties keep the earliest start and
    /// an instance where no selection has positive value yields the empty
    /// solution.
    pub fn solve(instance: &Instance) -> (Solution, f64) {
        let mut best = Solution::empty(instance.num_items());

        for (start, run) in Self::run_all_starts(instance).into_iter().enumerate() {
            let Some(solution) = run else {
                tracing::debug!(start, "start item exceeds capacity, skipped");
                continue;
            };
            if solution.value() > best.value() {
                best = solution;
            }
        }

        let value = best.value();
        tracing::debug!(
            value,
            weight = best.weight(),
            items = best.len(),
            "relative greedy finished"
        );
        (best, value)
    }

    /// Builds one solution seeded with `start`.
    ///
    /// Returns `None` when `start` alone exceeds the capacity: such an item
    /// can never be part of a feasible solution, so it is not used as a seed.
    pub fn construct_from(instance: &Instance, start: usize) -> Option<Solution> {
        let n = instance.num_items();
        let mut in_knapsack = vec![false; n];
        if !fits(instance, &in_knapsack, 0.0, start) {
            return None;
        }

        let mut selected = vec![start];
        in_knapsack[start] = true;
        let mut weight = instance.weight(start);
        let mut remaining: Vec<usize> = (0..n)
            .filter(|&i| i != start && fits(instance, &in_knapsack, weight, i))
            .collect();

        loop {
            // Strict `>` keeps the lowest index among equal densities, and a
            // candidate at -inf is never taken.
            let mut chosen: Option<usize> = None;
            let mut best_density = f64::NEG_INFINITY;
            for &i in &remaining {
                let d = marginal_density(instance, i, &selected);
                if d > best_density {
                    best_density = d;
                    chosen = Some(i);
                }
            }

            let Some(item) = chosen else { break };
            selected.push(item);
            in_knapsack[item] = true;
            weight += instance.weight(item);

            // Weight only grows, so anything that no longer fits is dropped for good.
            remaining.retain(|&i| i != item && fits(instance, &in_knapsack, weight, i));
        }

        Some(Solution::from_selection(instance, in_knapsack))
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all_starts(instance: &Instance) -> Vec<Option<Solution>> {
        (0..instance.num_items())
            .map(|start| Self::construct_from(instance, start))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_all_starts(instance: &Instance) -> Vec<Option<Solution>> {
        use rayon::prelude::*;
        (0..instance.num_items())
            .into_par_iter()
            .map(|start| Self::construct_from(instance, start))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InteractionMatrix;

    #[test]
    fn test_two_item_conflict() {
        let pairs = InteractionMatrix::from_pairs(2, &[(0, 1, 100.0)]).unwrap();
        let inst = Instance::new(vec![5.0, 5.0], vec![10.0, 10.0], pairs, 8.0).unwrap();
        let (sol, value) = GreedyRelative::solve(&inst);
        assert_eq!(value, 10.0);
        assert_eq!(sol.value(), 10.0);
        assert_eq!(sol.len(), 1);
        assert!(sol.weight() <= inst.capacity());
    }

    #[test]
    fn test_adapts_to_selected_items() {
        // Same instance where the absolute greedy is fooled into taking item 0.
        let pairs = InteractionMatrix::from_pairs(3, &[(0, 1, 100.0)]).unwrap();
        let inst = Instance::new(
            vec![5.0, 50.0, 5.0],
            vec![5.0, 1.0, 30.0],
            pairs,
            6.0,
        )
        .unwrap();
        let (sol, value) = GreedyRelative::solve(&inst);
        assert_eq!(sol.items(), vec![2]);
        assert_eq!(value, 30.0);
    }

    #[test]
    fn test_picks_up_pair_synergy() {
        // Item 1 and 2 are weak alone but strong together.
        let pairs = InteractionMatrix::from_pairs(3, &[(1, 2, 50.0)]).unwrap();
        let inst = Instance::new(
            vec![4.0, 3.0, 3.0],
            vec![20.0, 1.0, 1.0],
            pairs,
            6.0,
        )
        .unwrap();
        let (sol, value) = GreedyRelative::solve(&inst);
        assert_eq!(sol.items(), vec![1, 2]);
        assert_eq!(value, 52.0);
    }

    #[test]
    fn test_oversized_start_is_skipped() {
        let inst = Instance::new(
            vec![10.0, 2.0],
            vec![100.0, 1.0],
            InteractionMatrix::zeros(2),
            5.0,
        )
        .unwrap();
        assert!(GreedyRelative::construct_from(&inst, 0).is_none());
        let (sol, value) = GreedyRelative::solve(&inst);
        assert_eq!(sol.items(), vec![1]);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_all_items_oversized_gives_empty() {
        let inst = Instance::new(
            vec![10.0, 12.0],
            vec![5.0, 5.0],
            InteractionMatrix::zeros(2),
            5.0,
        )
        .unwrap();
        let (sol, value) = GreedyRelative::solve(&inst);
        assert!(sol.is_empty());
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        // From start 0, items 1 and 2 have equal density; only one fits.
        let inst = Instance::new(
            vec![1.0, 2.0, 2.0],
            vec![1.0, 4.0, 4.0],
            InteractionMatrix::zeros(3),
            3.0,
        )
        .unwrap();
        let sol = GreedyRelative::construct_from(&inst, 0).unwrap();
        assert_eq!(sol.items(), vec![0, 1]);
    }

    #[test]
    fn test_negative_zero_weight_item_never_taken() {
        let pairs = InteractionMatrix::from_pairs(2, &[(0, 1, -10.0)]).unwrap();
        let inst = Instance::new(vec![1.0, 0.0], vec![5.0, 1.0], pairs, 1.0).unwrap();
        let sol = GreedyRelative::construct_from(&inst, 0).unwrap();
        assert_eq!(sol.items(), vec![0]);
    }

    #[test]
    fn test_every_start_feasible() {
        let pairs = InteractionMatrix::from_pairs(
            5,
            &[(0, 1, 3.0), (1, 2, 7.0), (2, 3, -2.0), (0, 4, 4.0), (3, 4, 6.0)],
        )
        .unwrap();
        let inst = Instance::new(
            vec![3.0, 4.0, 2.0, 5.0, 6.0],
            vec![6.0, 2.0, 9.0, 1.0, 3.0],
            pairs,
            10.0,
        )
        .unwrap();
        for start in 0..inst.num_items() {
            let sol = GreedyRelative::construct_from(&inst, start).unwrap();
            assert!(sol.contains(start));
            assert!(sol.weight() <= inst.capacity());
        }
    }

    #[test]
    fn test_fill_never_exceeds_index_order_weight() {
        let inst = Instance::new(
            vec![0.1, 0.2, 0.3],
            vec![0.1, 1.0, 10.0],
            InteractionMatrix::zeros(3),
            0.6,
        )
        .unwrap();
        for start in 0..inst.num_items() {
            let sol = GreedyRelative::construct_from(&inst, start).unwrap();
            assert!(sol.is_feasible(&inst), "start {start}: weight {}", sol.weight());
        }
        let (sol, value) = GreedyRelative::solve(&inst);
        assert!(sol.is_feasible(&inst));
        assert_eq!(sol.items(), vec![1, 2]);
        assert!((value - 11.0).abs() < 1e-12);
    }
}
