//! Edit scripts between the operands of a failed comparison.
//!
//! Policy, first match wins:
//! 1. Two strings: a line-level script, unless both are a single line.
//! 2. Either side a range: nothing.
//! 3. Two sequences of comparable elements: an element-level script.
//! 4. Anything else: nothing.

use std::fmt;

use attest_reflect::{elements_equal, DiffView, Reflect};

/// One step of an edit script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// `element` appears in the right operand at `offset`.
    Insert { offset: usize, element: String },
    /// `element` at `offset` in the left operand is gone.
    Remove { offset: usize, element: String },
}

/// How to turn the left operand into the right one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Difference {
    changes: Vec<Change>,
}

impl Difference {
    /// Compute the difference between two unequal operands, if the pair is
    /// diffable and the script is not empty.
    pub fn between(lhs: &dyn Reflect, rhs: &dyn Reflect) -> Option<Difference> {
        let changes = match (lhs.diff_view(), rhs.diff_view()) {
            (DiffView::Text(lhs), DiffView::Text(rhs)) => text_changes(lhs, rhs)?,
            (DiffView::Range, _) | (_, DiffView::Range) => return None,
            (DiffView::Sequence(lhs), DiffView::Sequence(rhs)) => sequence_changes(&lhs, &rhs)?,
            _ => return None,
        };
        if changes.is_empty() {
            return None;
        }
        Some(Difference { changes })
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn insertions(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().filter_map(|change| match change {
            Change::Insert { element, .. } => Some(element.as_str()),
            Change::Remove { .. } => None,
        })
    }

    pub fn removals(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().filter_map(|change| match change {
            Change::Remove { element, .. } => Some(element.as_str()),
            Change::Insert { .. } => None,
        })
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let insertions: Vec<_> = self.insertions().collect();
        let removals: Vec<_> = self.removals().collect();
        if !insertions.is_empty() {
            write!(f, "inserted [{}]", insertions.join(", "))?;
            if !removals.is_empty() {
                f.write_str(", ")?;
            }
        }
        if !removals.is_empty() {
            write!(f, "removed [{}]", removals.join(", "))?;
        }
        Ok(())
    }
}

fn text_changes(lhs: &str, rhs: &str) -> Option<Vec<Change>> {
    let lhs_lines: Vec<&str> = lhs.lines().collect();
    let rhs_lines: Vec<&str> = rhs.lines().collect();
    if lhs_lines.len() <= 1 && rhs_lines.len() <= 1 {
        return None;
    }

    let (lhs, rhs) = (lhs_lines.join("\n"), rhs_lines.join("\n"));
    let changeset = ::difference::Changeset::new(&lhs, &rhs, "\n");
    let mut changes = Vec::new();
    let (mut lhs_offset, mut rhs_offset) = (0, 0);
    for chunk in &changeset.diffs {
        match chunk {
            ::difference::Difference::Same(text) => {
                let count = text.split('\n').count();
                lhs_offset += count;
                rhs_offset += count;
            }
            ::difference::Difference::Rem(text) => {
                for line in text.split('\n') {
                    changes.push(Change::Remove {
                        offset: lhs_offset,
                        element: line.test_description(),
                    });
                    lhs_offset += 1;
                }
            }
            ::difference::Difference::Add(text) => {
                for line in text.split('\n') {
                    changes.push(Change::Insert {
                        offset: rhs_offset,
                        element: line.test_description(),
                    });
                    rhs_offset += 1;
                }
            }
        }
    }
    Some(changes)
}

/// Edit distance past which two sequences are reported without a script.
const MAX_EDITS: usize = 1_000;

/// Shortest element-level script. Gives up when a pair of elements that
/// must be compared cannot be, or when the sequences are too far apart.
fn sequence_changes(lhs: &[&dyn Reflect], rhs: &[&dyn Reflect]) -> Option<Vec<Change>> {
    let prefix = common_prefix(lhs, rhs)?;
    let (lhs_rest, rhs_rest) = (&lhs[prefix..], &rhs[prefix..]);
    let suffix = common_suffix(lhs_rest, rhs_rest)?;
    let lhs_core = &lhs_rest[..lhs_rest.len() - suffix];
    let rhs_core = &rhs_rest[..rhs_rest.len() - suffix];

    let mut removals = Vec::new();
    let mut insertions = Vec::new();
    for edit in edit_script(lhs_core, rhs_core)? {
        match edit {
            Edit::Remove(offset) => removals.push(remove(lhs, prefix + offset)),
            Edit::Insert(offset) => insertions.push(insert(rhs, prefix + offset)),
        }
    }
    removals.append(&mut insertions);
    Some(removals)
}

fn common_prefix(lhs: &[&dyn Reflect], rhs: &[&dyn Reflect]) -> Option<usize> {
    let mut count = 0;
    for (left, right) in lhs.iter().zip(rhs) {
        if !elements_equal(*left, *right)? {
            break;
        }
        count += 1;
    }
    Some(count)
}

fn common_suffix(lhs: &[&dyn Reflect], rhs: &[&dyn Reflect]) -> Option<usize> {
    let mut count = 0;
    for (left, right) in lhs.iter().rev().zip(rhs.iter().rev()) {
        if !elements_equal(*left, *right)? {
            break;
        }
        count += 1;
    }
    Some(count)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edit {
    /// Offset into the left operand.
    Remove(usize),
    /// Offset into the right operand.
    Insert(usize),
}

/// Myers' greedy shortest edit script.
///
/// `trace[d]` holds the furthest left offset reached on each diagonal after
/// `d` edits, indexed by `diagonal + d` where the diagonal is left offset
/// minus right offset. Entries off the parity of `d`, or outside both
/// operands, are `None`.
fn edit_script(lhs: &[&dyn Reflect], rhs: &[&dyn Reflect]) -> Option<Vec<Edit>> {
    let (n, m) = (lhs.len(), rhs.len());
    let limit = (n + m).min(MAX_EDITS);
    let mut trace: Vec<Vec<Option<usize>>> = Vec::new();

    for d in 0..=limit {
        let mut frontier = vec![None; 2 * d + 1];
        for index in (0..=2 * d).step_by(2) {
            let start = match trace.last() {
                None => Some(0),
                Some(previous) => step(previous, index, d, n, m).map(|(x, _)| x),
            };
            let Some(mut x) = start else {
                continue;
            };
            let mut y = x + d - index;
            while x < n && y < m && elements_equal(lhs[x], rhs[y])? {
                x += 1;
                y += 1;
            }
            frontier[index] = Some(x);
            if x == n && y == m {
                trace.push(frontier);
                return Some(backtrack(&trace, n, m));
            }
        }
        trace.push(frontier);
    }
    None
}

/// Best way onto diagonal `index - d` with the `d`th edit: the left offset
/// the edit lands on, and the edit itself.
fn step(
    previous: &[Option<usize>],
    index: usize,
    d: usize,
    n: usize,
    m: usize,
) -> Option<(usize, Edit)> {
    let down = (index < 2 * d)
        .then(|| previous[index])
        .flatten()
        .map(|x| (x, x + d - index))
        .filter(|&(_, y)| y <= m)
        .map(|(x, y)| (x, Edit::Insert(y - 1)));
    let right = (index >= 2)
        .then(|| previous[index - 2])
        .flatten()
        .filter(|&x| x < n)
        .map(|x| (x + 1, Edit::Remove(x)));
    match (down, right) {
        (Some(down), Some(right)) if right.0 > down.0 => Some(right),
        (Some(down), _) => Some(down),
        (None, right) => right,
    }
}

fn backtrack(trace: &[Vec<Option<usize>>], n: usize, m: usize) -> Vec<Edit> {
    let mut edits = Vec::new();
    let (mut x, mut y) = (n, m);
    for d in (1..trace.len()).rev() {
        let index = x + d - y;
        let Some((start, edit)) = step(&trace[d - 1], index, d, n, m) else {
            break;
        };
        (x, y) = match edit {
            Edit::Insert(offset) => (start, offset),
            Edit::Remove(offset) => (offset, start + d - index),
        };
        edits.push(edit);
    }
    edits.reverse();
    edits
}

fn remove(elements: &[&dyn Reflect], offset: usize) -> Change {
    Change::Remove {
        offset,
        element: elements[offset].test_description(),
    }
}

fn insert(elements: &[&dyn Reflect], offset: usize) -> Change {
    Change::Insert {
        offset,
        element: elements[offset].test_description(),
    }
}

#[cfg(test)]
mod tests;
