//! Parent selection.
//!
//! Tournament selection with noisy acceptance: sample `k` distinct
//! chromosomes, rank them, and return the winner with probability
//! `win_probability`, otherwise the runner-up. The occasional runner-up
//! keeps weaker lineages alive without weakening global elitism.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Chromosome;
use rand::seq::index;
use rand::Rng;

/// Tournament selection parameters.
///
/// # Examples
///
/// ```
/// use qkp_heur::ga::Tournament;
///
/// let sel = Tournament::default();
/// assert_eq!(sel.size, 2);
/// assert!((sel.win_probability - 0.9).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tournament {
    /// Number of distinct chromosomes drawn per tournament (`k`).
    pub size: usize,

    /// Probability of returning the best-ranked contestant rather than the
    /// second-ranked one.
    pub win_probability: f64,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            size: 2,
            win_probability: 0.9,
        }
    }
}

impl Tournament {
    pub fn new(size: usize, win_probability: f64) -> Self {
        Self {
            size,
            win_probability,
        }
    }

    /// Select a parent index from the population.
    ///
    /// `k` is clamped to the population size; a single-contestant tournament
    /// always returns its only member. Contestants with equal fitness keep
    /// their draw order.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let n = population.len();
        let k = self.size.clamp(1, n);

        let mut contestants: Vec<usize> = index::sample(rng, n, k).into_vec();
        contestants.sort_by(|&a, &b| population[b].fitness().total_cmp(&population[a].fitness()));

        if contestants.len() == 1 || rng.random_range(0.0..1.0) < self.win_probability {
            contestants[0]
        } else {
            contestants[1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Instance, InteractionMatrix};
    use crate::random::create_rng;

    /// One item per chromosome; fitness equals that item's value.
    fn make_population(values: &[f64]) -> Vec<Chromosome> {
        let n = values.len();
        let inst = Instance::new(
            vec![1.0; n],
            values.to_vec(),
            InteractionMatrix::zeros(n),
            1.0,
        )
        .unwrap();
        (0..n)
            .map(|i| {
                let mut genes = vec![false; n];
                genes[i] = true;
                Chromosome::evaluated(&inst, genes)
            })
            .collect()
    }

    #[test]
    fn test_full_tournament_returns_best_most_of_the_time() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        let sel = Tournament::new(4, 0.9);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[sel.select(&pop, &mut rng)] += 1;
        }
        // k = n: winner is always index 0, runner-up always index 3.
        assert_eq!(counts[1] + counts[2], 0, "got {counts:?}");
        assert!(counts[0] > 8700 && counts[0] < 9300, "got {counts:?}");
        assert_eq!(counts[0] + counts[3], n);
    }

    #[test]
    fn test_certain_win_never_returns_runner_up() {
        let pop = make_population(&[3.0, 7.0]);
        let mut rng = create_rng(1);
        let sel = Tournament::new(2, 1.0);
        for _ in 0..500 {
            assert_eq!(sel.select(&pop, &mut rng), 1);
        }
    }

    #[test]
    fn test_zero_win_always_returns_runner_up() {
        let pop = make_population(&[3.0, 7.0]);
        let mut rng = create_rng(1);
        let sel = Tournament::new(2, 0.0);
        for _ in 0..500 {
            assert_eq!(sel.select(&pop, &mut rng), 0);
        }
    }

    #[test]
    fn test_binary_tournament_favors_fitter() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = create_rng(42);
        let sel = Tournament::default();

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[sel.select(&pop, &mut rng)] += 1;
        }
        assert!(counts[0] > counts[3], "got {counts:?}");
        assert!(counts[3] > counts[1], "got {counts:?}");
        assert!(counts[1] > counts[2], "got {counts:?}");
    }

    #[test]
    fn test_single_chromosome() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        for _ in 0..10 {
            assert_eq!(Tournament::new(3, 0.0).select(&pop, &mut rng), 0);
        }
    }

    #[test]
    fn test_same_seed_same_picks() {
        let pop = make_population(&[4.0, 9.0, 2.0, 6.0, 7.0]);
        let sel = Tournament::default();
        let picks = |seed| {
            let mut rng = create_rng(seed);
            (0..50).map(|_| sel.select(&pop, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(picks(11), picks(11));
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Chromosome> = vec![];
        let mut rng = create_rng(42);
        Tournament::default().select(&pop, &mut rng);
    }
}
