//! Objective evaluation: value, weight, feasibility, and density.
//!
//! All functions are pure and take the selection as a `&[bool]` of length
//! `num_items` (or, for densities, the ids of the currently selected items).
//! Both greedy solvers rank candidates through [`marginal_density`], so the
//! adaptive and non-adaptive heuristics share one definition of "density".

use crate::instance::Instance;

/// Linear value of the selected items plus the pairwise value of every
/// selected unordered pair `i < j`, each counted once.
pub fn evaluate_value(instance: &Instance, selected: &[bool]) -> f64 {
    let n = instance.num_items();
    let mut total = 0.0;
    for i in 0..n {
        if !selected[i] {
            continue;
        }
        total += instance.value(i);
        let row = instance.interactions().row(i);
        for j in (i + 1)..n {
            if selected[j] {
                total += row[j];
            }
        }
    }
    total
}

/// Sum of the weights of the selected items.
pub fn evaluate_weight(instance: &Instance, selected: &[bool]) -> f64 {
    selected
        .iter()
        .enumerate()
        .filter(|(_, &s)| s)
        .map(|(i, _)| instance.weight(i))
        .sum()
}

/// `evaluate_weight(selected) <= capacity`.
pub fn is_feasible(instance: &Instance, selected: &[bool]) -> bool {
    evaluate_weight(instance, selected) <= instance.capacity()
}

/// Whether `item` can join `selected` without breaking feasibility.
///
/// `running` is the caller's incrementally accumulated weight of `selected`.
/// It decides every case that is clear of the capacity by more than the
/// rounding error of a float sum; borderline cases are settled with the same
/// index-order sum as [`evaluate_weight`], so an accepted item never yields a
/// selection that [`is_feasible`] rejects.
pub fn fits(instance: &Instance, selected: &[bool], running: f64, item: usize) -> bool {
    let capacity = instance.capacity();
    let candidate = running + instance.weight(item);
    let slack = 4.0 * selected.len() as f64 * f64::EPSILON * candidate.abs().max(capacity);
    if candidate + slack < capacity {
        true
    } else if candidate - slack > capacity {
        false
    } else {
        weight_with(instance, selected, item) <= capacity
    }
}

/// `evaluate_weight` of `selected` with `item` switched on.
fn weight_with(instance: &Instance, selected: &[bool], item: usize) -> f64 {
    selected
        .iter()
        .enumerate()
        .filter(|&(i, &s)| s || i == item)
        .map(|(i, _)| instance.weight(i))
        .sum()
}

/// Value gained by adding `item` to a solution holding `partial`:
/// its linear value plus its interaction with every other item in `partial`.
///
/// `item` itself is skipped if present in `partial`.
pub fn marginal_gain(instance: &Instance, item: usize, partial: &[usize]) -> f64 {
    let row = instance.interactions().row(item);
    let pairwise: f64 = partial
        .iter()
        .filter(|&&s| s != item)
        .map(|&s| row[s])
        .sum();
    instance.value(item) + pairwise
}

/// Marginal gain of `item` against `partial`, divided by the item's weight.
///
/// # Zero-weight items
///
/// A zero-weight item has no finite density. It ranks as `+∞` when its
/// gain is non-negative (it is free to take) and as `−∞` when its gain is
/// negative (taking it can only lose value).
pub fn marginal_density(instance: &Instance, item: usize, partial: &[usize]) -> f64 {
    density(marginal_gain(instance, item, partial), instance.weight(item))
}

/// Density of `item` against every other item in the instance.
///
/// This is the non-adaptive score used by
/// [`GreedyAbsolute`](crate::greedy::GreedyAbsolute): it counts interactions
/// with all items, selected or not.
pub fn absolute_density(instance: &Instance, item: usize) -> f64 {
    let pairwise: f64 = instance.interactions().row(item).iter().sum();
    density(instance.value(item) + pairwise, instance.weight(item))
}

fn density(gain: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        gain / weight
    } else if gain >= 0.0 {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InteractionMatrix;

    fn three_items() -> Instance {
        let pairs =
            InteractionMatrix::from_pairs(3, &[(0, 1, 5.0), (0, 2, -3.0), (1, 2, 8.0)]).unwrap();
        Instance::new(vec![2.0, 4.0, 5.0], vec![10.0, 20.0, 30.0], pairs, 10.0).unwrap()
    }

    #[test]
    fn test_value_all_three() {
        let inst = three_items();
        let v = evaluate_value(&inst, &[true, true, true]);
        assert!((v - 70.0).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn test_value_subsets() {
        let inst = three_items();
        assert_eq!(evaluate_value(&inst, &[false, false, false]), 0.0);
        assert!((evaluate_value(&inst, &[true, false, true]) - 37.0).abs() < 1e-12);
        assert!((evaluate_value(&inst, &[false, true, false]) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_weight_and_feasibility() {
        let inst = three_items();
        assert!((evaluate_weight(&inst, &[true, true, true]) - 11.0).abs() < 1e-12);
        assert!(!is_feasible(&inst, &[true, true, true]));
        assert!(is_feasible(&inst, &[true, true, false]));
        assert!(is_feasible(&inst, &[false, true, true]));
    }

    #[test]
    fn test_exactly_at_capacity_is_feasible() {
        let inst = Instance::new(
            vec![4.0, 6.0],
            vec![1.0, 1.0],
            InteractionMatrix::zeros(2),
            10.0,
        )
        .unwrap();
        assert!(is_feasible(&inst, &[true, true]));
    }

    #[test]
    fn test_marginal_density() {
        let inst = three_items();
        // item 2 against {0, 1}: (30 - 3 + 8) / 5
        assert!((marginal_density(&inst, 2, &[0, 1]) - 7.0).abs() < 1e-12);
        // against nothing: linear only
        assert!((marginal_density(&inst, 1, &[]) - 5.0).abs() < 1e-12);
        // self in partial is ignored
        assert!((marginal_density(&inst, 1, &[1, 0]) - 6.25).abs() < 1e-12);
    }

    #[test]
    fn test_absolute_density_counts_all_items() {
        let inst = three_items();
        // item 0: (10 + 5 - 3) / 2
        assert!((absolute_density(&inst, 0) - 6.0).abs() < 1e-12);
        assert!(
            (absolute_density(&inst, 0) - marginal_density(&inst, 0, &[0, 1, 2])).abs() < 1e-12
        );
    }

    #[test]
    fn test_zero_weight_density_policy() {
        let pairs = InteractionMatrix::from_pairs(2, &[(0, 1, -5.0)]).unwrap();
        let inst = Instance::new(vec![0.0, 1.0], vec![1.0, 1.0], pairs, 1.0).unwrap();
        assert_eq!(marginal_density(&inst, 0, &[]), f64::INFINITY);
        assert_eq!(marginal_density(&inst, 0, &[1]), f64::NEG_INFINITY);
        assert_eq!(absolute_density(&inst, 0), f64::NEG_INFINITY);
    }

    /// Weights whose index-order sum lands one ulp above the capacity.
    fn tenths() -> Instance {
        Instance::new(
            vec![0.1, 0.2, 0.3],
            vec![0.1, 1.0, 10.0],
            InteractionMatrix::zeros(3),
            0.6,
        )
        .unwrap()
    }

    #[test]
    fn test_fits_agrees_with_index_order_sum() {
        let inst = tenths();
        // Accumulated as 0.3 + 0.2 + 0.1 the total is exactly 0.6, but the
        // index-order sum is 0.6000000000000001.
        let running = 0.3 + 0.2;
        assert!(running + 0.1 <= inst.capacity());
        assert!(!fits(&inst, &[false, true, true], running, 0));
        assert!(!is_feasible(&inst, &[true, true, true]));
    }

    #[test]
    fn test_fits_clear_cases() {
        let inst = tenths();
        assert!(fits(&inst, &[false, false, false], 0.0, 2));
        assert!(fits(&inst, &[false, true, false], 0.2, 2));
        assert!(fits(&inst, &[true, false, false], 0.1, 2));
        assert!(is_feasible(&inst, &[true, false, true]));

        let inst = Instance::new(
            vec![4.0, 6.0, 1.0],
            vec![1.0, 1.0, 1.0],
            InteractionMatrix::zeros(3),
            10.0,
        )
        .unwrap();
        assert!(fits(&inst, &[true, false, false], 4.0, 1));
        assert!(!fits(&inst, &[true, true, false], 10.0, 2));
    }
}
