//! The `Reflect` capability.

use std::any::Any;

use crate::{DynEq, TypeInfo};

/// Shape of a reflected value, mirroring how it should be displayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DisplayStyle {
    /// No visible structure (numbers, strings, opaque values).
    #[default]
    Plain,
    Struct,
    Class,
    Enum,
    Tuple,
    Optional,
    Collection,
    Set,
    Dictionary,
    Range,
}

impl DisplayStyle {
    /// Collections, sets and dictionaries.
    #[inline]
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            DisplayStyle::Collection | DisplayStyle::Set | DisplayStyle::Dictionary
        )
    }
}

/// Identity of a shared, reference-counted object.
///
/// Two `ObjectId`s are equal iff they came from the same allocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of the allocation `ptr` points into.
    #[inline]
    pub fn of<T: ?Sized>(ptr: *const T) -> Self {
        ObjectId(ptr.cast::<()>() as usize)
    }
}

/// How a value takes part in difference computation and erased equality.
pub enum DiffView<'a> {
    /// Not diffable.
    Opaque,
    /// String-like; diffed line by line.
    Text(&'a str),
    /// A range; never diffed element by element.
    Range,
    /// An ordered collection; diffed element by element.
    Sequence(Vec<&'a dyn Reflect>),
    /// A fixed-arity product; compared position by position, never diffed.
    Tuple(Vec<&'a dyn Reflect>),
    /// An optional; compared through its payload, never diffed.
    Optional(Option<&'a dyn Reflect>),
}

/// A value that can describe itself in a failure report.
///
/// Only [`test_description`](Reflect::test_description) is required. The
/// other methods default to a childless, non-diffable value whose type is
/// the implementing type.
pub trait Reflect {
    /// Human-readable description shown next to the source text.
    fn test_description(&self) -> String;

    /// Longer description used by verbose renderings.
    fn debug_description(&self) -> String {
        self.test_description()
    }

    /// Dynamic type of the value.
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<Self>()
    }

    /// Shape of the value.
    fn display_style(&self) -> DisplayStyle {
        DisplayStyle::Plain
    }

    /// Call `visit` once per child, in display order, with its label.
    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        let _ = visit;
    }

    /// Identity of the underlying shared object, for cycle detection.
    fn object_id(&self) -> Option<ObjectId> {
        None
    }

    /// How differences and erased equality see this value.
    fn diff_view(&self) -> DiffView<'_> {
        DiffView::Opaque
    }

    /// This value as a type-erased `PartialEq`, when it has one.
    fn as_equatable(&self) -> Option<&dyn DynEq> {
        None
    }
}

/// A [`Reflect`] value that can also be downcast.
///
/// Used by cast and instance checks, which need both the dynamic type and a
/// description of the value.
pub trait AnyReflect: Reflect + Any {
    /// Upcast for downcasting.
    fn any_ref(&self) -> &dyn Any;

    /// Upcast for reflection.
    fn reflect_ref(&self) -> &dyn Reflect;
}

impl<T: Reflect + Any> AnyReflect for T {
    fn any_ref(&self) -> &dyn Any {
        self
    }

    fn reflect_ref(&self) -> &dyn Reflect {
        self
    }
}
