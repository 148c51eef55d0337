//! Type-erased equality.
//!
//! Element-level differences compare elements of collections whose element
//! type is unknown to the caller. Elements that opt in through
//! [`Reflect::as_equatable`] compare with their own `PartialEq`; strings,
//! sequences, tuples and optionals compare structurally through their
//! [`DiffView`].

use std::any::Any;

use crate::{DiffView, Reflect};

/// `PartialEq` behind a trait object.
pub trait DynEq: Any {
    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// `self == other` when `other` has the same concrete type, else `false`.
    fn dyn_eq(&self, other: &dyn DynEq) -> bool;
}

impl<T: PartialEq + Any> DynEq for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynEq) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Compare two reflected values without knowing their types.
///
/// Returns `None` when the values cannot be compared, meaning neither opts
/// into erased equality and their shapes carry no comparable payload.
pub fn elements_equal(a: &dyn Reflect, b: &dyn Reflect) -> Option<bool> {
    if let (Some(a), Some(b)) = (a.as_equatable(), b.as_equatable()) {
        return Some(a.dyn_eq(b));
    }
    match (a.diff_view(), b.diff_view()) {
        (DiffView::Text(a), DiffView::Text(b)) => Some(a == b),
        (DiffView::Sequence(a), DiffView::Sequence(b))
        | (DiffView::Tuple(a), DiffView::Tuple(b)) => all_equal(&a, &b),
        (DiffView::Optional(a), DiffView::Optional(b)) => match (a, b) {
            (None, None) => Some(true),
            (Some(a), Some(b)) => elements_equal(a, b),
            _ => Some(false),
        },
        _ => None,
    }
}

fn all_equal(a: &[&dyn Reflect], b: &[&dyn Reflect]) -> Option<bool> {
    if a.len() != b.len() {
        return Some(false);
    }
    for (a, b) in a.iter().zip(b) {
        if !elements_equal(*a, *b)? {
            return Some(false);
        }
    }
    Some(true)
}
