//! Expression identifiers.
//!
//! An `ExpressionId` names the position of a sub-expression inside the
//! syntax tree of one expectation. Identifiers are assigned by generated
//! code at the call site and consumed during a single evaluation.
//!
//! # Encoding
//!
//! - `Root`: the empty path.
//! - `Packed(u64)`: every set bit is one path segment, read in ascending
//!   order. Only strictly ascending paths with all segments below 64 fit.
//! - `Path`: explicit segment list for everything else.
//!
//! Equality and hashing look at the expanded segments only, so the same
//! path built through different encodings compares equal.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

/// Number of segments that expand without a heap allocation.
const INLINE_SEGMENTS: usize = 8;

/// Position of a sub-expression in its original syntax tree.
#[derive(Clone)]
pub struct ExpressionId(Elements);

#[derive(Clone)]
enum Elements {
    Root,
    Packed(u64),
    Path(Box<[u32]>),
}

impl ExpressionId {
    /// The identifier of the whole expression.
    pub const ROOT: ExpressionId = ExpressionId(Elements::Root);

    /// Create an identifier from a packed word.
    ///
    /// Intended for generated code, which computes the word at compile time.
    /// A zero word is the root.
    #[inline]
    pub const fn from_packed(word: u64) -> Self {
        if word == 0 {
            ExpressionId(Elements::Root)
        } else {
            ExpressionId(Elements::Packed(word))
        }
    }

    /// Encode a path, choosing the packed form when it can represent it.
    pub fn pack(segments: &[u32]) -> Self {
        if segments.is_empty() {
            return Self::ROOT;
        }
        match pack_word(segments) {
            Some(word) => ExpressionId(Elements::Packed(word)),
            None => ExpressionId(Elements::Path(segments.into())),
        }
    }

    /// Create an identifier that always uses the explicit path form.
    pub fn from_path(segments: Vec<u32>) -> Self {
        if segments.is_empty() {
            Self::ROOT
        } else {
            ExpressionId(Elements::Path(segments.into_boxed_slice()))
        }
    }

    /// The identifier of the `segment`-th child of this one.
    pub fn child(&self, segment: u32) -> Self {
        let mut segments = self.expand();
        segments.push(segment);
        Self::pack(&segments)
    }

    /// Iterate the path segments without allocating.
    #[inline]
    pub fn segments(&self) -> Segments<'_> {
        match &self.0 {
            Elements::Root => Segments::Bits(0),
            Elements::Packed(word) => Segments::Bits(*word),
            Elements::Path(path) => Segments::Slice(path.iter()),
        }
    }

    /// Collect the path segments.
    pub fn expand(&self) -> SmallVec<[u32; INLINE_SEGMENTS]> {
        self.segments().collect()
    }

    /// Number of segments in the path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments().len()
    }

    /// Check if this identifies the whole expression.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.depth() == 0
    }

    /// Check if the packed encoding is in use.
    #[inline]
    pub fn is_packed(&self) -> bool {
        matches!(self.0, Elements::Packed(_))
    }
}

/// Set one bit per segment, or give up if the bit scan could not recover
/// the same sequence.
fn pack_word(segments: &[u32]) -> Option<u64> {
    let mut word = 0u64;
    let mut previous: Option<u32> = None;
    for &segment in segments {
        if segment >= u64::BITS || previous.is_some_and(|p| segment <= p) {
            return None;
        }
        word |= 1 << segment;
        previous = Some(segment);
    }
    Some(word)
}

/// Iterator over the segments of an [`ExpressionId`].
#[derive(Clone, Debug)]
pub enum Segments<'a> {
    /// Remaining set bits of a packed word.
    Bits(u64),
    /// Remaining entries of an explicit path.
    Slice(std::slice::Iter<'a, u32>),
}

impl Iterator for Segments<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        match self {
            Segments::Bits(word) => {
                if *word == 0 {
                    return None;
                }
                let segment = word.trailing_zeros();
                *word &= *word - 1;
                Some(segment)
            }
            Segments::Slice(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            Segments::Bits(word) => word.count_ones() as usize,
            Segments::Slice(iter) => iter.len(),
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl PartialEq for ExpressionId {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Elements::Packed(a), Elements::Packed(b)) => a == b,
            _ => self.segments().eq(other.segments()),
        }
    }
}

impl Eq for ExpressionId {}

impl Hash for ExpressionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let segments = self.segments();
        state.write_usize(segments.len());
        for segment in segments {
            state.write_u32(segment);
        }
    }
}

impl Default for ExpressionId {
    fn default() -> Self {
        Self::ROOT
    }
}

impl FromIterator<u32> for ExpressionId {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let segments: SmallVec<[u32; INLINE_SEGMENTS]> = iter.into_iter().collect();
        Self::pack(&segments)
    }
}

impl fmt::Debug for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "ExpressionId::ROOT");
        }
        write!(f, "ExpressionId")?;
        f.debug_list().entries(self.segments()).finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ExpressionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.segments())
    }
}
