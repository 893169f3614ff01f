//! Heuristic cost of an edit list.
//!
//! The comparator uses this to pick between a delete-first and an
//! insert-first path. Inserted bytes have to be carried verbatim in a patch
//! while deletions only carry a count, so inserts weigh more.

use crate::Delta;

/// Fixed overhead of every record.
pub const RECORD_COST: usize = 1;
/// Cost of each deleted byte.
pub const DELETE_BYTE_COST: usize = 1;
/// Cost of each inserted byte.
pub const INSERT_BYTE_COST: usize = 8;

/// Weights used to score an edit list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    pub record: usize,
    pub delete_byte: usize,
    pub insert_byte: usize,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            record: RECORD_COST,
            delete_byte: DELETE_BYTE_COST,
            insert_byte: INSERT_BYTE_COST,
        }
    }
}

impl CostModel {
    #[must_use]
    pub const fn new(record: usize, delete_byte: usize, insert_byte: usize) -> Self {
        Self {
            record,
            delete_byte,
            insert_byte,
        }
    }

    /// Cost of a record deleting `delete` bytes and inserting `insert` bytes.
    #[inline]
    #[must_use]
    pub const fn record_cost(&self, delete: usize, insert: usize) -> usize {
        self.record + delete * self.delete_byte + insert * self.insert_byte
    }

    #[must_use]
    pub fn delta_cost(&self, delta: &Delta) -> usize {
        self.record_cost(delta.delete, delta.insert.len())
    }
}

/// Cost of `deltas` under the default weights: every record costs 1, plus 1
/// per deleted byte, plus 8 per inserted byte. An empty list costs 0.
#[must_use]
pub fn cost(deltas: &[Delta]) -> usize {
    cost_with(deltas, &CostModel::default())
}

#[must_use]
pub fn cost_with(deltas: &[Delta], model: &CostModel) -> usize {
    deltas.iter().map(|d| model.delta_cost(d)).sum()
}
