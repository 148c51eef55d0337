//! Attest Reflect - describing runtime values for failure reports.
//!
//! Rust has no general runtime reflection, so values opt in through the
//! [`Reflect`] trait: describe yourself as text, say what shape you have,
//! and enumerate your children. The standard library types tests compare
//! most often are covered here; anything that implements `Debug` can opt in
//! with [`impl_reflect_debug!`] or [`impl_reflect_debug_eq!`].
//!
//! [`Value::reflecting`] turns a `Reflect` subject into a bounded,
//! cycle-safe snapshot:
//! - reference-counted objects already on the current descent path are not
//!   descended into again
//! - descent stops at [`ReflectOptions::max_child_depth`]
//! - collections keep at most [`ReflectOptions::max_collection_count`]
//!   children plus one child saying how many were omitted
//!
//! Snapshots are only built on the failure path, so none of this runs for
//! passing expectations.

mod equality;
mod impls;
mod options;
mod reflect;
mod type_info;
mod value;

pub use equality::{elements_equal, DynEq};
pub use options::ReflectOptions;
pub use reflect::{AnyReflect, DiffView, DisplayStyle, ObjectId, Reflect};
pub use type_info::TypeInfo;
pub use value::{Value, FUNCTION_PLACEHOLDER};

/// Implement [`Reflect`] for types that only implement `Debug`.
///
/// The `Debug` rendering becomes the description. The value has no
/// children and is not comparable element-wise in collection differences;
/// use [`impl_reflect_debug_eq!`] for `PartialEq + 'static` types.
#[macro_export]
macro_rules! impl_reflect_debug {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn test_description(&self) -> String {
                    format!("{self:?}")
                }
            }
        )+
    };
}

/// Like [`impl_reflect_debug!`], and also lets collection differences
/// compare the values with `PartialEq`.
#[macro_export]
macro_rules! impl_reflect_debug_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn test_description(&self) -> String {
                    format!("{self:?}")
                }

                fn as_equatable(&self) -> Option<&dyn $crate::DynEq> {
                    Some(self)
                }
            }
        )+
    };
}
