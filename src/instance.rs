//! Immutable QKP problem data.
//!
//! An [`Instance`] bundles the items (weight + linear value), the symmetric
//! [`InteractionMatrix`] of pairwise values, and the knapsack capacity.
//! Construction validates every structural invariant once; solvers read the
//! instance through shared references and never mutate it.

use crate::error::{QkpError, Result};

/// Kind of capacity constraint carried by an instance.
///
/// Solvers only interpret [`ConstraintType::LessOrEqual`]. The tag is kept
/// so that instances round-trip through the text format unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintType {
    /// `Σ weight ≤ capacity` (code 0).
    #[default]
    LessOrEqual,
    /// `Σ weight = capacity` (code 1). Carried through, not enforced.
    Equality,
}

impl ConstraintType {
    /// Parses the numeric code used in instance files.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ConstraintType::LessOrEqual),
            1 => Some(ConstraintType::Equality),
            _ => None,
        }
    }

    /// Numeric code used in instance files.
    pub fn code(self) -> i64 {
        match self {
            ConstraintType::LessOrEqual => 0,
            ConstraintType::Equality => 1,
        }
    }
}

/// A single selectable item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Stable 0-based index.
    pub id: usize,
    /// Weight charged against the capacity.
    pub weight: f64,
    /// Linear value earned when selected.
    pub value: f64,
}

/// Symmetric matrix of pairwise interaction values.
///
/// Stored densely (row-major, `dim × dim`) with both triangles filled, so
/// `get(i, j)` and `get(j, i)` read the same number and row scans are
/// contiguous. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMatrix"))]
pub struct InteractionMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl InteractionMatrix {
    /// All-zero matrix (a plain linear knapsack).
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![0.0; dim * dim],
        }
    }

    /// Builds the matrix from upper-triangle rows.
    ///
    /// `rows[i]` holds `pair(i, j)` for `j = i+1 .. dim`, so row `i` has
    /// `dim - 1 - i` entries and there are `dim - 1` rows (zero rows when
    /// `dim <= 1`).
    pub fn from_upper_triangle(dim: usize, rows: &[Vec<f64>]) -> Result<Self> {
        let expected_rows = dim.saturating_sub(1);
        if rows.len() != expected_rows {
            return Err(QkpError::InvalidInstance(format!(
                "expected {expected_rows} upper-triangle rows, got {}",
                rows.len()
            )));
        }
        let mut matrix = Self::zeros(dim);
        for (i, row) in rows.iter().enumerate() {
            let expected = dim - 1 - i;
            if row.len() != expected {
                return Err(QkpError::InvalidInstance(format!(
                    "upper-triangle row {i} has {} entries, expected {expected}",
                    row.len()
                )));
            }
            for (offset, &v) in row.iter().enumerate() {
                matrix.set_symmetric(i, i + 1 + offset, v)?;
            }
        }
        Ok(matrix)
    }

    /// Builds the matrix from a full square table, rejecting asymmetry.
    ///
    /// Diagonal entries are ignored and stored as zero.
    pub fn from_full(table: &[Vec<f64>]) -> Result<Self> {
        let dim = table.len();
        let mut matrix = Self::zeros(dim);
        for (i, row) in table.iter().enumerate() {
            if row.len() != dim {
                return Err(QkpError::InvalidInstance(format!(
                    "interaction row {i} has {} entries, expected {dim}",
                    row.len()
                )));
            }
        }
        for i in 0..dim {
            for j in (i + 1)..dim {
                if table[i][j] != table[j][i] {
                    return Err(QkpError::InvalidInstance(format!(
                        "interaction matrix is not symmetric at ({i}, {j}): {} != {}",
                        table[i][j], table[j][i]
                    )));
                }
                matrix.set_symmetric(i, j, table[i][j])?;
            }
        }
        Ok(matrix)
    }

    /// Builds the matrix from unordered `(i, j, value)` triples.
    ///
    /// Unlisted pairs are zero. A pair listed twice keeps the last value.
    pub fn from_pairs(dim: usize, pairs: &[(usize, usize, f64)]) -> Result<Self> {
        let mut matrix = Self::zeros(dim);
        for &(i, j, v) in pairs {
            if i >= dim || j >= dim {
                return Err(QkpError::InvalidInstance(format!(
                    "pair ({i}, {j}) out of range for {dim} items"
                )));
            }
            if i == j {
                return Err(QkpError::InvalidInstance(format!(
                    "self-pair ({i}, {i}) has no interaction value"
                )));
            }
            matrix.set_symmetric(i, j, v)?;
        }
        Ok(matrix)
    }

    fn set_symmetric(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        if !v.is_finite() {
            return Err(QkpError::InvalidInstance(format!(
                "interaction value at ({i}, {j}) is not finite"
            )));
        }
        self.values[i * self.dim + j] = v;
        self.values[j * self.dim + i] = v;
        Ok(())
    }

    /// Matrix dimension (number of items).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Pairwise value of the unordered pair `{i, j}`; zero when `i == j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dim + j]
    }

    /// Interaction values of item `i` against every item (diagonal is zero).
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.dim..(i + 1) * self.dim]
    }
}

/// A validated QKP instance.
///
/// # Examples
///
/// ```
/// use qkp_heur::{Instance, InteractionMatrix};
///
/// let pairs = InteractionMatrix::from_pairs(2, &[(0, 1, 100.0)]).unwrap();
/// let instance = Instance::new(vec![5.0, 5.0], vec![10.0, 10.0], pairs, 8.0).unwrap();
/// assert_eq!(instance.num_items(), 2);
/// assert_eq!(instance.pair(1, 0), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawInstance"))]
pub struct Instance {
    name: String,
    items: Vec<Item>,
    interactions: InteractionMatrix,
    capacity: f64,
    constraint_type: ConstraintType,
}

impl Instance {
    /// Validates and assembles an instance.
    ///
    /// # Errors
    /// [`QkpError::InvalidInstance`] when the item set is empty, lengths
    /// disagree, the capacity is negative or not finite, or any weight is
    /// negative or not finite.
    pub fn new(
        weights: Vec<f64>,
        values: Vec<f64>,
        interactions: InteractionMatrix,
        capacity: f64,
    ) -> Result<Self> {
        let n = weights.len();
        if n == 0 {
            return Err(QkpError::InvalidInstance("instance has no items".into()));
        }
        if values.len() != n {
            return Err(QkpError::InvalidInstance(format!(
                "{n} weights but {} linear values",
                values.len()
            )));
        }
        if interactions.dim() != n {
            return Err(QkpError::InvalidInstance(format!(
                "interaction matrix is {d}x{d} but instance has {n} items",
                d = interactions.dim()
            )));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(QkpError::InvalidInstance(format!(
                "capacity must be a non-negative finite number, got {capacity}"
            )));
        }

        let mut items = Vec::with_capacity(n);
        for (id, (weight, value)) in weights.into_iter().zip(values).enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(QkpError::InvalidInstance(format!(
                    "item {id} has invalid weight {weight}"
                )));
            }
            if !value.is_finite() {
                return Err(QkpError::InvalidInstance(format!(
                    "item {id} has non-finite value"
                )));
            }
            items.push(Item { id, weight, value });
        }

        Ok(Self {
            name: String::new(),
            items,
            interactions,
            capacity,
            constraint_type: ConstraintType::LessOrEqual,
        })
    }

    /// Sets the instance name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the constraint tag.
    pub fn with_constraint_type(mut self, constraint_type: ConstraintType) -> Self {
        self.constraint_type = constraint_type;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn constraint_type(&self) -> ConstraintType {
        self.constraint_type
    }

    pub fn interactions(&self) -> &InteractionMatrix {
        &self.interactions
    }

    #[inline]
    pub fn weight(&self, i: usize) -> f64 {
        self.items[i].weight
    }

    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        self.items[i].value
    }

    #[inline]
    pub fn pair(&self, i: usize, j: usize) -> f64 {
        self.interactions.get(i, j)
    }

    /// Whether item `i` fits into an empty knapsack.
    pub fn fits_alone(&self, i: usize) -> bool {
        self.items[i].weight <= self.capacity
    }
}

// ============================================================================
// Validated deserialization
// ============================================================================

/// Wire shape of [`InteractionMatrix`], checked before use.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix {
    dim: usize,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMatrix> for InteractionMatrix {
    type Error = QkpError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        let expected = raw.dim.checked_mul(raw.dim).ok_or_else(|| {
            QkpError::InvalidInstance(format!("interaction dimension {} is too large", raw.dim))
        })?;
        if raw.values.len() != expected {
            return Err(QkpError::InvalidInstance(format!(
                "interaction matrix of dimension {} needs {expected} values, got {}",
                raw.dim,
                raw.values.len()
            )));
        }
        let table: Vec<Vec<f64>> = raw
            .values
            .chunks(raw.dim.max(1))
            .map(<[f64]>::to_vec)
            .collect();
        let matrix = Self::from_full(&table)?;
        if (0..raw.dim).any(|i| raw.values[i * raw.dim + i] != 0.0) {
            return Err(QkpError::InvalidInstance(
                "interaction matrix has a non-zero diagonal".into(),
            ));
        }
        Ok(matrix)
    }
}

/// Wire shape of [`Instance`], rebuilt through [`Instance::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawInstance {
    name: String,
    items: Vec<Item>,
    interactions: InteractionMatrix,
    capacity: f64,
    constraint_type: ConstraintType,
}

#[cfg(feature = "serde")]
impl TryFrom<RawInstance> for Instance {
    type Error = QkpError;

    fn try_from(raw: RawInstance) -> Result<Self> {
        if let Some((pos, item)) = raw.items.iter().enumerate().find(|(pos, it)| it.id != *pos) {
            return Err(QkpError::InvalidInstance(format!(
                "item at position {pos} has id {}",
                item.id
            )));
        }
        let weights = raw.items.iter().map(|it| it.weight).collect();
        let values = raw.items.iter().map(|it| it.value).collect();
        Ok(Instance::new(weights, values, raw.interactions, raw.capacity)?
            .with_name(raw.name)
            .with_constraint_type(raw.constraint_type))
    }
}
