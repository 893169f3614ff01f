use crate::Delta;

impl Delta {
    /// Whether `next`, the record right after this one, can be folded into it.
    ///
    /// Records at the same offset always merge (a delete followed by an insert
    /// there is a replace). Otherwise only pure deletions that touch merge.
    #[must_use]
    pub fn can_merge(&self, next: &Delta) -> bool {
        self.offset == next.offset
            || (!self.has_insert()
                && !next.has_insert()
                && self.offset.checked_add(self.delete) == Some(next.offset))
    }

    /// Fold `next` into this record if [`Delta::can_merge`] allows it.
    /// Returns `false` and leaves `self` untouched otherwise.
    pub fn try_merge(&mut self, next: &Delta) -> bool {
        if !self.can_merge(next) {
            return false;
        }
        self.delete += next.delete;
        self.insert.extend_from_slice(&next.insert);
        true
    }
}

/// Merge adjacent records of an edit list where it is safe to do so.
///
/// Records are never reordered. Each record is tested against the merged
/// result of everything before it in its run, so a chain of single-byte
/// deletions collapses into one. No-op records that cannot merge are kept.
#[must_use]
pub fn compact(deltas: impl IntoIterator<Item = Delta>) -> Vec<Delta> {
    let mut results: Vec<Delta> = Vec::new();
    for next in deltas {
        if let Some(last) = results.last_mut()
            && last.try_merge(&next)
        {
            continue;
        }
        results.push(next);
    }
    results
}
