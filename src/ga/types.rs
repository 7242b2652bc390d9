//! Chromosome representation for the knapsack GA.

use crate::instance::Instance;
use crate::objective::{evaluate_value, is_feasible};

/// A candidate selection vector with its cached fitness.
///
/// Chromosomes are built by the operators in [`operators`](super::operators)
/// and never modified after they enter a population; variation always works
/// on a copy of the parent genes.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<bool>,
    fitness: f64,
}

impl Chromosome {
    /// Wraps a gene vector. Fitness is unset (`-inf`) until evaluated.
    pub fn new(genes: Vec<bool>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Wraps a gene vector and evaluates it immediately.
    pub fn evaluated(instance: &Instance, genes: Vec<bool>) -> Self {
        let fitness = fitness(instance, &genes);
        Self { genes, fitness }
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    pub(crate) fn evaluate(&mut self, instance: &Instance) {
        self.fitness = fitness(instance, &self.genes);
    }

    pub fn into_genes(self) -> Vec<bool> {
        self.genes
    }
}

/// Objective value of a feasible selection, `0` for an infeasible one.
///
/// The operators only ever produce feasible chromosomes; the zero branch is
/// a floor for inputs built by hand.
pub fn fitness(instance: &Instance, genes: &[bool]) -> f64 {
    if is_feasible(instance, genes) {
        evaluate_value(instance, genes)
    } else {
        0.0
    }
}
