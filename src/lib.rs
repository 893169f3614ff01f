//! Byte-level diff and patch.
//!
//! [`diff`] computes an ordered list of [`Delta`] records (insert and delete
//! operations) that turns one byte buffer into another. The records are
//! rebased so each offset refers to the buffer produced by the previous
//! record, which makes the list directly replayable with [`apply`] or
//! [`apply_all`].
//!
//! ```
//! let deltas = bytedelta::diff(b"foo", b"bar");
//! assert_eq!(deltas, vec![bytedelta::Delta::replace_at(0, 3, *b"bar")]);
//! assert_eq!(bytedelta::apply_all(b"foo", &deltas), b"bar");
//! ```

pub mod codec;
pub mod compact;
pub mod cost;
pub mod diff;
pub mod error;

pub use codec::{Patch, patch, read_from, write_to};
pub use compact::compact;
pub use cost::{CostModel, DELETE_BYTE_COST, INSERT_BYTE_COST, RECORD_COST, cost, cost_with};
pub use diff::{diff, diff_with, rebase};
pub use error::{PatchError, PatchResult};

/// One edit at a position: remove `delete` bytes starting at `offset`, then
/// insert `insert` there.
///
/// In a list returned by [`diff`] the offset is relative to the buffer as it
/// stands when this record is applied, not to the original source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub offset: usize,
    pub delete: usize,
    pub insert: Vec<u8>,
}

impl Delta {
    #[must_use]
    pub fn insert_at(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            delete: 0,
            insert: bytes.into(),
        }
    }

    #[must_use]
    pub fn delete_at(offset: usize, count: usize) -> Self {
        Self {
            offset,
            delete: count,
            insert: Vec::new(),
        }
    }

    #[must_use]
    pub fn replace_at(offset: usize, count: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            delete: count,
            insert: bytes.into(),
        }
    }

    /// Neither deletes nor inserts anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.delete == 0 && self.insert.is_empty()
    }

    #[must_use]
    pub fn has_insert(&self) -> bool {
        !self.insert.is_empty()
    }

    /// Length of a buffer of `len` bytes after this record is applied to it,
    /// with the same clamping [`apply`] performs.
    #[must_use]
    pub fn applied_len(&self, len: usize) -> usize {
        let (start, end) = self.clamped_range(len);
        len - (end - start) + self.insert.len()
    }

    /// The `[start, end)` range of a `len`-byte buffer this record removes.
    fn clamped_range(&self, len: usize) -> (usize, usize) {
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.delete).min(len);
        (start, end)
    }
}

/// Apply a single record to `buffer`, returning the edited copy.
///
/// Bytes `[0, offset)` are kept, followed by the inserted bytes, followed by
/// bytes `[offset + delete, len)`. An offset past the end of the buffer is
/// clamped to the end (the insert is appended) and a deletion running past
/// the end stops at the end. Neither case panics.
#[must_use]
pub fn apply(buffer: &[u8], delta: &Delta) -> Vec<u8> {
    let (start, end) = delta.clamped_range(buffer.len());
    let mut output = Vec::with_capacity(delta.applied_len(buffer.len()));
    output.extend_from_slice(&buffer[..start]);
    output.extend_from_slice(&delta.insert);
    output.extend_from_slice(&buffer[end..]);
    output
}

/// Same as [`apply`] but edits `buffer` without allocating a new one.
pub fn apply_in_place(buffer: &mut Vec<u8>, delta: &Delta) {
    let (start, end) = delta.clamped_range(buffer.len());
    buffer.splice(start..end, delta.insert.iter().copied());
}

/// Replay every record in order against a copy of `source`.
#[must_use]
pub fn apply_all(source: &[u8], deltas: &[Delta]) -> Vec<u8> {
    let mut buffer = source.to_vec();
    for delta in deltas {
        apply_in_place(&mut buffer, delta);
    }
    buffer
}

/// Replay `deltas` against `source` one record at a time, yielding each
/// record with the buffer it produced.
#[must_use]
pub fn replay<'a>(source: &[u8], deltas: &'a [Delta]) -> Replay<'a> {
    Replay {
        buffer: source.to_vec(),
        deltas: deltas.iter(),
    }
}

/// Iterator returned by [`replay`].
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    buffer: Vec<u8>,
    deltas: std::slice::Iter<'a, Delta>,
}

impl<'a> Iterator for Replay<'a> {
    type Item = (&'a Delta, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        let delta = self.deltas.next()?;
        apply_in_place(&mut self.buffer, delta);
        Some((delta, self.buffer.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.deltas.size_hint()
    }
}

impl ExactSizeIterator for Replay<'_> {}
