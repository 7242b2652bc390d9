//! Solver output: a selected subset with its evaluated value and weight.

use crate::instance::Instance;
use crate::objective;

/// A subset of items, encoded as a selection vector of length `num_items`.
///
/// Value and weight are computed once at construction, so a `Solution` is a
/// plain data value that can be compared and reported without the instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    selected: Vec<bool>,
    value: f64,
    weight: f64,
}

impl Solution {
    /// The empty selection.
    pub fn empty(num_items: usize) -> Self {
        Self {
            selected: vec![false; num_items],
            value: 0.0,
            weight: 0.0,
        }
    }

    /// Evaluates a selection vector against `instance`.
    pub fn from_selection(instance: &Instance, selected: Vec<bool>) -> Self {
        debug_assert_eq!(selected.len(), instance.num_items());
        let value = objective::evaluate_value(instance, &selected);
        let weight = objective::evaluate_weight(instance, &selected);
        Self {
            selected,
            value,
            weight,
        }
    }

    /// Evaluates the subset given by item ids. Duplicate ids are ignored.
    pub fn from_items(instance: &Instance, ids: &[usize]) -> Self {
        let mut selected = vec![false; instance.num_items()];
        for &id in ids {
            selected[id] = true;
        }
        Self::from_selection(instance, selected)
    }

    /// Selection vector.
    pub fn selected(&self) -> &[bool] {
        &self.selected
    }

    /// Selected item ids in ascending order.
    pub fn items(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.selected.iter().any(|&s| s)
    }

    /// Total objective value (linear plus pairwise).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Total weight of the selected items.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether the total weight respects the instance capacity.
    pub fn is_feasible(&self, instance: &Instance) -> bool {
        self.weight <= instance.capacity()
    }

    pub fn into_selection(self) -> Vec<bool> {
        self.selected
    }
}
