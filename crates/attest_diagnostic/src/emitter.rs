//! Issue Emitter
//!
//! Renders an issue the way a person reads it in test output, colored on request.
//!
//! ```text
//! Expectation failed: (xs → [1, 2, 3]) == (ys → [1, 3])
//!   --> tests/lists.rs:12:5
//!    = xs == ys: removed [2]
//!    = note: lists should match
//! ```

use std::io::Write;

use crate::{Issue, IssueKind};

/// ANSI color codes for terminal output.
mod colors {
    pub const FAILURE: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const DIFFERENCE: &str = "\x1b[1;33m"; // Bold yellow
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Whether failure reports are colored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colored when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes issues as text, with optional color.
///
/// Write errors are ignored; a failing reporter must not fail the test.
pub struct IssueEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> IssueEmitter<W> {
    /// `is_terminal` only matters for [`ColorMode::Auto`].
    pub fn new(writer: W, mode: ColorMode, is_terminal: bool) -> Self {
        IssueEmitter {
            writer,
            colors: mode.enabled(is_terminal),
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    /// Write one issue followed by a blank line.
    pub fn emit(&mut self, issue: &Issue) {
        match &issue.kind {
            IssueKind::ExpectationFailed(expectation) => {
                self.write_colored("Expectation failed", colors::FAILURE);
                let _ = write!(
                    self.writer,
                    ": {}",
                    expectation.evaluated_expression.expanded_description()
                );
                if let Some(mismatch) = expectation.mismatch_description() {
                    let _ = write!(self.writer, ": {mismatch}");
                }
                let _ = writeln!(self.writer);
            }
            IssueKind::Unconditional => {
                self.write_colored("Issue recorded", colors::FAILURE);
                let _ = writeln!(self.writer);
            }
        }

        if let Some(location) = issue.source_context.source_location {
            let _ = write!(self.writer, "  ");
            self.write_colored("-->", colors::LOCATION);
            let _ = writeln!(self.writer, " {location}");
        }

        if let Some(expectation) = issue.expectation() {
            for (source, difference) in expectation.evaluated_expression.differences() {
                let _ = write!(self.writer, "   = ");
                self.write_colored(&source, colors::DIFFERENCE);
                let _ = writeln!(self.writer, ": {difference}");
            }
        }

        for comment in &issue.comments {
            let _ = write!(self.writer, "   = ");
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {comment}");
        }

        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
    }
}
