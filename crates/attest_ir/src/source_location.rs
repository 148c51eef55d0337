//! Source locations for recorded failures.

use std::fmt;

/// Where in the user's source an expectation was written.
///
/// Captured by generated code with `file!()`/`line!()`/`column!()`, or by
/// [`SourceLocation::caller`] through `#[track_caller]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceLocation {
    /// Path of the file as the compiler saw it.
    pub file_path: &'static str,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl SourceLocation {
    /// Create a new source location.
    #[inline]
    pub const fn new(file_path: &'static str, line: u32, column: u32) -> Self {
        SourceLocation {
            file_path,
            line,
            column,
        }
    }

    /// The location of the caller of the function this is invoked from.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        SourceLocation::new(location.file(), location.line(), location.column())
    }

    /// The last component of the file path.
    pub fn file_name(&self) -> &'static str {
        self.file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file_path)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.column)
    }
}

#[cfg(test)]
mod tests;
