//! Free-form comments attached to expectations.

use std::fmt;

/// A note the test author attached to an expectation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment { text: text.into() }
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Self {
        Comment::new(text)
    }
}

impl From<String> for Comment {
    fn from(text: String) -> Self {
        Comment { text }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
