//! Runtime type names.

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;

/// Name of a value's dynamic type.
///
/// Built from [`std::any::type_name`], so the fully qualified name is only
/// as stable as the compiler makes it. It is meant for display, not for
/// identity checks across builds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeInfo {
    fully_qualified_name: Cow<'static, str>,
}

impl TypeInfo {
    /// Type information for `T`.
    #[inline]
    pub fn of<T: ?Sized>() -> Self {
        TypeInfo {
            fully_qualified_name: Cow::Borrowed(type_name::<T>()),
        }
    }

    /// Type information for a type known only by name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        TypeInfo {
            fully_qualified_name: name.into(),
        }
    }

    /// The name including module paths, e.g. `alloc::vec::Vec<i32>`.
    #[inline]
    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    /// The name with every module path stripped, e.g. `Vec<i32>`.
    pub fn unqualified_name(&self) -> String {
        let name = self.fully_qualified_name();
        let mut out = String::with_capacity(name.len());
        let mut token_start = 0;
        for (index, ch) in name.char_indices() {
            if is_separator(ch) {
                out.push_str(last_path_component(&name[token_start..index]));
                out.push(ch);
                token_start = index + ch.len_utf8();
            }
        }
        out.push_str(last_path_component(&name[token_start..]));
        out
    }

    /// Check if this describes `T`.
    pub fn describes<T: ?Sized>(&self) -> bool {
        self.fully_qualified_name() == type_name::<T>()
    }

    /// Check if this describes `bool`.
    #[inline]
    pub fn is_bool(&self) -> bool {
        self.describes::<bool>()
    }
}

fn is_separator(ch: char) -> bool {
    matches!(
        ch,
        '<' | '>' | ',' | '(' | ')' | '[' | ']' | ';' | ' ' | '&' | '*'
    )
}

fn last_path_component(token: &str) -> &str {
    token.rsplit("::").next().unwrap_or(token)
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unqualified_name())
    }
}
