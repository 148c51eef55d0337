//! `Reflect` for standard library types.
//!
//! Scalars describe themselves with `Display` (integers, `bool`) or `Debug`
//! (floats, `char`, strings, which keeps quotes visible). Containers
//! enumerate their elements as children and render as `[a, b]`, `{k: v}`,
//! `(a, b)` or `a..b`. Smart pointers and references are transparent; `Rc`
//! and `Arc` additionally report object identity so snapshots can cut
//! cycles.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ops::{Range, RangeInclusive};
use std::rc::Rc;
use std::sync::Arc;

use crate::{DiffView, DisplayStyle, DynEq, ObjectId, Reflect, TypeInfo, FUNCTION_PLACEHOLDER};

fn as_reflect<T: Reflect>(value: &T) -> &dyn Reflect {
    value
}

fn join_descriptions<'a>(items: impl IntoIterator<Item = &'a dyn Reflect>, debug: bool) -> String {
    items
        .into_iter()
        .map(|item| {
            if debug {
                item.debug_description()
            } else {
                item.test_description()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// Scalars

macro_rules! reflect_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn test_description(&self) -> String {
                    self.to_string()
                }

                fn as_equatable(&self) -> Option<&dyn DynEq> {
                    Some(self)
                }
            }
        )+
    };
}

reflect_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool);

macro_rules! reflect_debug {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn test_description(&self) -> String {
                    format!("{self:?}")
                }

                fn as_equatable(&self) -> Option<&dyn DynEq> {
                    Some(self)
                }
            }
        )+
    };
}

reflect_debug!(f32, f64, char, ());

// Strings

impl Reflect for str {
    fn test_description(&self) -> String {
        format!("{self:?}")
    }

    fn diff_view(&self) -> DiffView<'_> {
        DiffView::Text(self)
    }
}

impl Reflect for String {
    fn test_description(&self) -> String {
        format!("{self:?}")
    }

    fn diff_view(&self) -> DiffView<'_> {
        DiffView::Text(self)
    }

    fn as_equatable(&self) -> Option<&dyn DynEq> {
        Some(self)
    }
}

impl Reflect for Cow<'_, str> {
    fn test_description(&self) -> String {
        format!("{:?}", self.as_ref())
    }

    fn diff_view(&self) -> DiffView<'_> {
        DiffView::Text(self)
    }
}

// Transparent wrappers

macro_rules! delegate_reflect {
    () => {
        fn test_description(&self) -> String {
            (**self).test_description()
        }

        fn debug_description(&self) -> String {
            (**self).debug_description()
        }

        fn type_info(&self) -> TypeInfo {
            (**self).type_info()
        }

        fn display_style(&self) -> DisplayStyle {
            (**self).display_style()
        }

        fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
            (**self).for_each_child(visit);
        }

        fn diff_view(&self) -> DiffView<'_> {
            (**self).diff_view()
        }

        fn as_equatable(&self) -> Option<&dyn DynEq> {
            (**self).as_equatable()
        }
    };
}

impl<T: Reflect + ?Sized> Reflect for &T {
    delegate_reflect!();

    fn object_id(&self) -> Option<ObjectId> {
        (**self).object_id()
    }
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    delegate_reflect!();

    fn object_id(&self) -> Option<ObjectId> {
        (**self).object_id()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    delegate_reflect!();

    fn object_id(&self) -> Option<ObjectId> {
        (**self).object_id()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    delegate_reflect!();

    fn object_id(&self) -> Option<ObjectId> {
        Some(ObjectId::of(Rc::as_ptr(self)))
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    delegate_reflect!();

    fn object_id(&self) -> Option<ObjectId> {
        Some(ObjectId::of(Arc::as_ptr(self)))
    }
}

/// Placeholder for a cell that is mutably borrowed while being described.
const BORROWED: &str = "<borrowed>";

impl<T: Reflect + ?Sized> Reflect for RefCell<T> {
    fn test_description(&self) -> String {
        self.try_borrow()
            .map_or_else(|_| BORROWED.to_owned(), |inner| inner.test_description())
    }

    fn debug_description(&self) -> String {
        self.try_borrow()
            .map_or_else(|_| BORROWED.to_owned(), |inner| inner.debug_description())
    }

    fn type_info(&self) -> TypeInfo {
        self.try_borrow()
            .map_or_else(|_| TypeInfo::of::<Self>(), |inner| inner.type_info())
    }

    fn display_style(&self) -> DisplayStyle {
        self.try_borrow()
            .map_or(DisplayStyle::Plain, |inner| inner.display_style())
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        if let Ok(inner) = self.try_borrow() {
            inner.for_each_child(visit);
        }
    }
}

// Enums

impl<T: Reflect> Reflect for Option<T> {
    fn test_description(&self) -> String {
        match self {
            Some(value) => value.test_description(),
            None => "None".to_owned(),
        }
    }

    fn debug_description(&self) -> String {
        match self {
            Some(value) => format!("Some({})", value.debug_description()),
            None => "None".to_owned(),
        }
    }

    fn display_style(&self) -> DisplayStyle {
        DisplayStyle::Optional
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        if let Some(value) = self {
            visit(Some("some"), value);
        }
    }

    fn diff_view(&self) -> DiffView<'_> {
        DiffView::Optional(self.as_ref().map(as_reflect))
    }
}

impl<T: Reflect, E: Reflect> Reflect for Result<T, E> {
    fn test_description(&self) -> String {
        match self {
            Ok(value) => format!("Ok({})", value.test_description()),
            Err(error) => format!("Err({})", error.test_description()),
        }
    }

    fn debug_description(&self) -> String {
        match self {
            Ok(value) => format!("Ok({})", value.debug_description()),
            Err(error) => format!("Err({})", error.debug_description()),
        }
    }

    fn display_style(&self) -> DisplayStyle {
        DisplayStyle::Enum
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        match self {
            Ok(value) => visit(Some("ok"), value),
            Err(error) => visit(Some("err"), error),
        }
    }
}

// Collections

macro_rules! collection_methods {
    ($open:literal, $close:literal, $style:expr) => {
        fn test_description(&self) -> String {
            format!(
                concat!($open, "{}", $close),
                join_descriptions(self.iter().map(as_reflect), false)
            )
        }

        fn debug_description(&self) -> String {
            format!(
                concat!($open, "{}", $close),
                join_descriptions(self.iter().map(as_reflect), true)
            )
        }

        fn display_style(&self) -> DisplayStyle {
            $style
        }

        fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
            for element in self.iter() {
                visit(None, element);
            }
        }
    };
}

macro_rules! sequence_methods {
    () => {
        collection_methods!("[", "]", DisplayStyle::Collection);

        fn diff_view(&self) -> DiffView<'_> {
            DiffView::Sequence(self.iter().map(as_reflect).collect())
        }
    };
}

impl<T: Reflect> Reflect for [T] {
    sequence_methods!();
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    sequence_methods!();
}

impl<T: Reflect> Reflect for Vec<T> {
    sequence_methods!();
}

impl<T: Reflect> Reflect for VecDeque<T> {
    sequence_methods!();
}

// Sets have no meaningful element order, so they are never diffed.

impl<T: Reflect, S> Reflect for HashSet<T, S> {
    collection_methods!("{{", "}}", DisplayStyle::Set);
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    collection_methods!("{{", "}}", DisplayStyle::Set);
}

/// One key-value pair of a dictionary, reflected as a labelled pair.
struct MapEntry<'a, K, V> {
    key: &'a K,
    value: &'a V,
}

impl<K: Reflect, V: Reflect> Reflect for MapEntry<'_, K, V> {
    fn test_description(&self) -> String {
        format!(
            "{}: {}",
            self.key.test_description(),
            self.value.test_description()
        )
    }

    fn debug_description(&self) -> String {
        format!(
            "{}: {}",
            self.key.debug_description(),
            self.value.debug_description()
        )
    }

    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<(K, V)>()
    }

    fn display_style(&self) -> DisplayStyle {
        DisplayStyle::Tuple
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        visit(Some("key"), self.key);
        visit(Some("value"), self.value);
    }
}

macro_rules! map_methods {
    () => {
        fn test_description(&self) -> String {
            let entries: Vec<String> = self
                .iter()
                .map(|(key, value)| MapEntry { key, value }.test_description())
                .collect();
            format!("{{{}}}", entries.join(", "))
        }

        fn debug_description(&self) -> String {
            let entries: Vec<String> = self
                .iter()
                .map(|(key, value)| MapEntry { key, value }.debug_description())
                .collect();
            format!("{{{}}}", entries.join(", "))
        }

        fn display_style(&self) -> DisplayStyle {
            DisplayStyle::Dictionary
        }

        fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
            for (key, value) in self.iter() {
                visit(None, &MapEntry { key, value });
            }
        }
    };
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    map_methods!();
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    map_methods!();
}

// Tuples

macro_rules! reflect_tuple {
    ($(($($name:ident $index:tt),+))+) => {
        $(
            impl<$($name: Reflect),+> Reflect for ($($name,)+) {
                fn test_description(&self) -> String {
                    format!("({})", join_descriptions([$(as_reflect(&self.$index)),+], false))
                }

                fn debug_description(&self) -> String {
                    format!("({})", join_descriptions([$(as_reflect(&self.$index)),+], true))
                }

                fn display_style(&self) -> DisplayStyle {
                    DisplayStyle::Tuple
                }

                fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
                    $(visit(Some(concat!(".", stringify!($index))), &self.$index);)+
                }

                fn diff_view(&self) -> DiffView<'_> {
                    DiffView::Tuple(vec![$(as_reflect(&self.$index)),+])
                }
            }
        )+
    };
}

reflect_tuple! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
}

// Ranges

impl<T: Reflect> Reflect for Range<T> {
    fn test_description(&self) -> String {
        format!(
            "{}..{}",
            self.start.test_description(),
            self.end.test_description()
        )
    }

    fn display_style(&self) -> DisplayStyle {
        DisplayStyle::Range
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        visit(Some("start"), &self.start);
        visit(Some("end"), &self.end);
    }

    fn diff_view(&self) -> DiffView<'_> {
        DiffView::Range
    }
}

impl<T: Reflect> Reflect for RangeInclusive<T> {
    fn test_description(&self) -> String {
        format!(
            "{}..={}",
            self.start().test_description(),
            self.end().test_description()
        )
    }

    fn display_style(&self) -> DisplayStyle {
        DisplayStyle::Range
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(Option<&str>, &dyn Reflect)) {
        visit(Some("start"), self.start());
        visit(Some("end"), self.end());
    }

    fn diff_view(&self) -> DiffView<'_> {
        DiffView::Range
    }
}

// Functions

macro_rules! reflect_fn {
    ($($arg:ident),*) => {
        impl<R $(, $arg)*> Reflect for fn($($arg),*) -> R {
            fn test_description(&self) -> String {
                FUNCTION_PLACEHOLDER.to_owned()
            }
        }
    };
}

reflect_fn!();
reflect_fn!(A);
reflect_fn!(A, B);
reflect_fn!(A, B, C);
