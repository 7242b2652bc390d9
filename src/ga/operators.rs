//! Feasibility-preserving variation operators for selection vectors.
//!
//! Every operator returns a fresh gene vector; parents are only read.
//! All of them end with a capacity-checked random-order fill, so anything
//! they return fits the knapsack.
//!
//! # Operators
//!
//! - [`random_greedy`]: empty selection + repair (population initialization)
//! - [`crossover`]: intersection of both parents + repair
//! - [`mutate`]: drop each selected item with probability `2/|selected|`,
//!   then refill from the items the parent did not hold
//!
//! # Repair
//!
//! [`repair`] first drops randomly chosen items while the selection is over
//! capacity, then visits every unselected item in random order and adds it
//! if it still fits.

use crate::instance::Instance;
use crate::objective::{evaluate_weight, fits};
use rand::seq::SliceRandom;
use rand::Rng;

// ============================================================================
// Repair
// ============================================================================

/// Restores feasibility and fills spare capacity in random order.
///
/// On a feasible input the drop phase is a no-op and consumes no randomness.
/// Items heavier than the whole capacity are never added.
pub fn repair<R: Rng>(instance: &Instance, genes: &mut [bool], rng: &mut R) {
    let weight = shed(instance, genes, rng);
    let candidates: Vec<usize> = (0..genes.len()).filter(|&i| !genes[i]).collect();
    fill(instance, genes, candidates, weight, rng);
}

/// Drops randomly chosen items until the selection fits; returns its weight.
fn shed<R: Rng>(instance: &Instance, genes: &mut [bool], rng: &mut R) -> f64 {
    let mut weight = evaluate_weight(instance, genes);
    if weight > instance.capacity() {
        let mut selected: Vec<usize> = (0..genes.len()).filter(|&i| genes[i]).collect();
        selected.shuffle(rng);
        for i in selected {
            if weight <= instance.capacity() {
                break;
            }
            genes[i] = false;
            weight = evaluate_weight(instance, genes);
        }
    }
    weight
}

/// Visits `candidates` in random order and adds each one that still fits.
///
/// `weight` must be the [`evaluate_weight`] of `genes`.
fn fill<R: Rng>(
    instance: &Instance,
    genes: &mut [bool],
    mut candidates: Vec<usize>,
    mut weight: f64,
    rng: &mut R,
) {
    candidates.shuffle(rng);
    for i in candidates {
        if !genes[i] && fits(instance, genes, weight, i) {
            genes[i] = true;
            weight += instance.weight(i);
        }
    }
}

// ============================================================================
// Construction and variation
// ============================================================================

/// Random-order greedy fill of an empty knapsack.
pub fn random_greedy<R: Rng>(instance: &Instance, rng: &mut R) -> Vec<bool> {
    let mut genes = vec![false; instance.num_items()];
    repair(instance, &mut genes, rng);
    genes
}

/// Items selected by both parents.
pub fn intersection(parent1: &[bool], parent2: &[bool]) -> Vec<bool> {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| a && b)
        .collect()
}

/// Intersection crossover followed by repair.
///
/// The child keeps only the items both parents agree on, which is feasible
/// whenever either parent is, then refills the freed capacity randomly.
pub fn crossover<R: Rng>(
    instance: &Instance,
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> Vec<bool> {
    let mut child = intersection(parent1, parent2);
    repair(instance, &mut child, rng);
    child
}

/// Per-item drop probability used by [`mutate`]: `2 / selected`, or `0`
/// when nothing is selected.
pub fn drop_probability(selected: usize) -> f64 {
    if selected == 0 {
        0.0
    } else {
        (2.0 / selected as f64).min(1.0)
    }
}

/// Adaptive drop mutation followed by a refill.
///
/// Each selected item is removed independently with probability
/// [`drop_probability`], so on average two items leave the knapsack
/// regardless of how full it is. The freed capacity is refilled in random
/// order from the items the parent did not hold; dropped items stay out.
pub fn mutate<R: Rng>(instance: &Instance, parent: &[bool], rng: &mut R) -> Vec<bool> {
    let mut child = parent.to_vec();
    let (selected, excluded): (Vec<usize>, Vec<usize>) =
        (0..child.len()).partition(|&i| child[i]);
    let p = drop_probability(selected.len());

    for i in selected {
        if rng.random_range(0.0..1.0) < p {
            child[i] = false;
        }
    }

    let weight = shed(instance, &mut child, rng);
    fill(instance, &mut child, excluded, weight, rng);
    child
}

// ============================================================================
// Tests
// ============================================================================
