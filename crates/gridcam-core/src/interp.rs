//! Piecewise-linear interpolation over sparse calibration knots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GridcamError, Result};

/// A sparse, sorted mapping from grid index to physical value.
///
/// Knot indices are unique and kept sorted, and a table always holds at
/// least one knot, so [`KnotTable::interpolate`] is defined for every index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<i32, f64>", into = "BTreeMap<i32, f64>")]
pub struct KnotTable {
    knots: BTreeMap<i32, f64>,
}

impl KnotTable {
    /// Creates a table from `(grid_index, physical_value)` knots.
    ///
    /// # Errors
    ///
    /// Returns [`GridcamError::EmptyKnotTable`] if no knots are given and
    /// [`GridcamError::DuplicateKnot`] if an index appears twice.
    pub fn new(knots: impl IntoIterator<Item = (i32, f64)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (index, value) in knots {
            if map.insert(index, value).is_some() {
                return Err(GridcamError::DuplicateKnot(index));
            }
        }
        Self::try_from(map)
    }

    /// Wraps a map already known to be non-empty.
    pub(crate) fn from_nonempty(knots: BTreeMap<i32, f64>) -> Self {
        debug_assert!(!knots.is_empty());
        Self { knots }
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Returns true if the table has no knots. Never the case once built.
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Iterates over the knots in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.knots.iter().map(|(&k, &v)| (k, v))
    }

    /// Smallest knot as `(index, value)`.
    pub fn first(&self) -> (i32, f64) {
        self.knots
            .first_key_value()
            .map_or((0, 0.0), |(&k, &v)| (k, v))
    }

    /// Largest knot as `(index, value)`.
    pub fn last(&self) -> (i32, f64) {
        self.knots
            .last_key_value()
            .map_or((0, 0.0), |(&k, &v)| (k, v))
    }

    /// Maps a grid index to a physical value.
    ///
    /// Exact knots return their stored value unchanged. Indices outside the
    /// knot range clamp to the boundary knot. Anything else is linearly
    /// interpolated between the two bracketing knots.
    pub fn interpolate(&self, index: i32) -> f64 {
        if let Some(&value) = self.knots.get(&index) {
            return value;
        }

        let (first_key, first_value) = self.first();
        let (last_key, last_value) = self.last();
        if index <= first_key {
            return first_value;
        }
        if index >= last_key {
            return last_value;
        }

        let lower = self.knots.range(..=index).next_back();
        let upper = self.knots.range(index..).next();
        match (lower, upper) {
            (Some((&k0, &v0)), Some((&k1, &v1))) if k1 != k0 => {
                let t = (f64::from(index) - f64::from(k0)) / (f64::from(k1) - f64::from(k0));
                v0 + t * (v1 - v0)
            }
            // Unreachable for a sorted, non-empty table.
            _ => first_value,
        }
    }
}

impl TryFrom<BTreeMap<i32, f64>> for KnotTable {
    type Error = GridcamError;

    fn try_from(knots: BTreeMap<i32, f64>) -> Result<Self> {
        if knots.is_empty() {
            return Err(GridcamError::EmptyKnotTable);
        }
        Ok(Self { knots })
    }
}

impl From<KnotTable> for BTreeMap<i32, f64> {
    fn from(table: KnotTable) -> Self {
        table.knots
    }
}

/// Free-function form of [`KnotTable::interpolate`].
pub fn interpolate(index: i32, knots: &KnotTable) -> f64 {
    knots.interpolate(index)
}
