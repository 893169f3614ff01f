//! Edit list generation.
//!
//! The comparison walks a grid of positions `(x, y)` in the source `a` and the
//! target `b`. Equal bytes are matched for free. On a mismatch the walk may
//! delete `a[x]` or insert `b[y]`, and picks whichever leaves the cheaper
//! (compacted) edit list for the rest of the walk, preferring the deletion
//! when both cost the same.
//!
//! Instead of recursing, the grid is filled backwards from the bottom-right
//! corner. A cell keeps the cost of the list the rest of the walk produces and
//! the head record of that list, which is all a parent cell needs: prepending
//! a record to a compacted list merges at most once, and a merge saves exactly
//! one record overhead. Time and memory are `O(n * m)` in the lengths left
//! after the common prefix.

use tracing::{debug, trace};

use crate::{CostModel, Delta};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    End,
    Match,
    Delete,
    Insert,
}

/// Shape of the first record of a cell's edit list.
#[derive(Clone, Copy, Debug)]
struct Head {
    offset: usize,
    delete: usize,
    has_insert: bool,
}

impl Head {
    /// Same rule as [`Delta::can_merge`].
    fn can_merge(self, next: Head) -> bool {
        self.offset == next.offset
            || (!self.has_insert
                && !next.has_insert
                && self.offset.checked_add(self.delete) == Some(next.offset))
    }
}

#[derive(Clone, Copy, Debug)]
struct Cell {
    cost: usize,
    head: Option<Head>,
}

impl Cell {
    const EMPTY: Self = Self {
        cost: 0,
        head: None,
    };

    fn single(head: Head, cost: usize) -> Self {
        Self {
            cost,
            head: Some(head),
        }
    }

    /// The cell obtained by emitting `head` (inserting `insert` bytes) in
    /// front of this cell's list.
    fn prepend(self, head: Head, insert: usize, model: &CostModel) -> Self {
        let own = model.record_cost(head.delete, insert);
        match self.head {
            Some(next) if head.can_merge(next) => Self::single(
                Head {
                    offset: head.offset,
                    delete: head.delete + next.delete,
                    has_insert: head.has_insert || next.has_insert,
                },
                own + self.cost - model.record,
            ),
            _ => Self::single(head, own + self.cost),
        }
    }
}

/// Compute the edit list turning `a` into `b`, with offsets rebased so the
/// records can be applied one after another.
///
/// Identical inputs give an empty list.
#[must_use]
pub fn diff(a: &[u8], b: &[u8]) -> Vec<Delta> {
    diff_with(a, b, &CostModel::default())
}

/// [`diff`] with explicit cost weights.
#[must_use]
pub fn diff_with(a: &[u8], b: &[u8], model: &CostModel) -> Vec<Delta> {
    let mut deltas = compare(a, b, model);
    rebase(&mut deltas);
    deltas
}

/// Turn source-relative offsets into offsets within the buffer being edited,
/// assuming the records are applied in order.
pub fn rebase(deltas: &mut [Delta]) {
    let mut inserted = 0usize;
    let mut deleted = 0usize;
    for delta in deltas {
        delta.offset = delta.offset.saturating_add(inserted).saturating_sub(deleted);
        inserted += delta.insert.len();
        deleted += delta.delete;
    }
}

/// Edit list with offsets relative to `a`.
fn compare(a: &[u8], b: &[u8], model: &CostModel) -> Vec<Delta> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a_rest, b_rest) = (&a[prefix..], &b[prefix..]);
    let (n, m) = (a_rest.len(), b_rest.len());
    let width = m + 1;

    let mut steps = vec![Step::End; (n + 1) * width];
    let mut below = vec![Cell::EMPTY; width];
    let mut row = vec![Cell::EMPTY; width];

    for i in (0..=n).rev() {
        let x = prefix + i;
        for j in (0..=m).rev() {
            row[j] = if i == n {
                if j < m {
                    let head = Head {
                        offset: x,
                        delete: 0,
                        has_insert: true,
                    };
                    Cell::single(head, model.record_cost(0, m - j))
                } else {
                    Cell::EMPTY
                }
            } else if j == m {
                let head = Head {
                    offset: x,
                    delete: n - i,
                    has_insert: false,
                };
                Cell::single(head, model.record_cost(n - i, 0))
            } else if a_rest[i] == b_rest[j] {
                steps[i * width + j] = Step::Match;
                below[j + 1]
            } else {
                let deleted = below[j];
                let inserted = row[j + 1];
                if deleted.cost <= inserted.cost {
                    steps[i * width + j] = Step::Delete;
                    let head = Head {
                        offset: x,
                        delete: 1,
                        has_insert: false,
                    };
                    deleted.prepend(head, 0, model)
                } else {
                    steps[i * width + j] = Step::Insert;
                    let head = Head {
                        offset: x,
                        delete: 0,
                        has_insert: true,
                    };
                    inserted.prepend(head, 1, model)
                }
            };
        }
        std::mem::swap(&mut below, &mut row);
    }

    let path = walk(&steps, width, a_rest.len(), b_rest, prefix);
    trace!(steps = path.len(), "walked edit path");

    // Fold back to front so each record meets the already compacted tail,
    // the same order the recursive definition compacts in.
    let mut reversed: Vec<Delta> = Vec::with_capacity(path.len());
    for mut delta in path.into_iter().rev() {
        if let Some(head) = reversed.last_mut()
            && delta.try_merge(head)
        {
            *head = delta;
            continue;
        }
        reversed.push(delta);
    }
    reversed.reverse();

    debug!(
        source_len = a.len(),
        target_len = b.len(),
        prefix,
        records = reversed.len(),
        cost = below[0].cost,
        "computed diff"
    );
    reversed
}

/// Follow the chosen steps from the top-left corner, emitting one record per
/// edit step and one final record for whatever is left on either side.
fn walk(steps: &[Step], width: usize, n: usize, b_rest: &[u8], prefix: usize) -> Vec<Delta> {
    let m = width - 1;
    let mut path = Vec::new();
    let (mut i, mut j) = (0, 0);
    loop {
        let x = prefix + i;
        match steps[i * width + j] {
            Step::Match => {
                i += 1;
                j += 1;
            }
            Step::Delete => {
                path.push(Delta::delete_at(x, 1));
                i += 1;
            }
            Step::Insert => {
                path.push(Delta::insert_at(x, vec![b_rest[j]]));
                j += 1;
            }
            Step::End => {
                if i < n {
                    path.push(Delta::delete_at(x, n - i));
                } else if j < m {
                    path.push(Delta::insert_at(x, &b_rest[j..]));
                }
                return path;
            }
        }
    }
}
