//! Recorded failures.

use std::fmt;

use attest_ir::SourceLocation;
use tracing::debug;

use crate::{Backtrace, Comment, Configuration, Event, Expectation};

/// What kind of failure an issue reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// An expectation evaluated to false, unwrapped `None`, or saw the
    /// wrong error.
    ExpectationFailed(Box<Expectation>),
    /// The test recorded a failure directly.
    Unconditional,
}

/// Where an issue came from.
#[derive(Clone, Debug, Default)]
pub struct SourceContext {
    pub backtrace: Option<Backtrace>,
    pub source_location: Option<SourceLocation>,
}

impl SourceContext {
    /// A context for `source_location`, with a backtrace when the current
    /// configuration asks for one.
    pub fn here(source_location: SourceLocation) -> Self {
        let backtrace = Configuration::current()
            .capture_backtraces
            .then(Backtrace::capture);
        SourceContext {
            backtrace,
            source_location: Some(source_location),
        }
    }
}

/// Source contexts compare by location only; backtraces are incidental.
impl PartialEq for SourceContext {
    fn eq(&self, other: &Self) -> bool {
        self.source_location == other.source_location
    }
}

impl Eq for SourceContext {}

/// A failure recorded against the running test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub comments: Vec<Comment>,
    pub source_context: SourceContext,
}

impl Issue {
    pub fn new(kind: IssueKind, comments: Vec<Comment>, source_context: SourceContext) -> Self {
        Issue {
            kind,
            comments,
            source_context,
        }
    }

    /// Record an unconditional failure at the caller's location.
    #[track_caller]
    pub fn record(comments: Vec<Comment>) -> Issue {
        let issue = Issue::new(
            IssueKind::Unconditional,
            comments,
            SourceContext::here(SourceLocation::caller()),
        );
        issue.post();
        issue
    }

    /// Post this issue to the current configuration's event sink.
    pub fn post(&self) {
        debug!(
            location = ?self.source_context.source_location,
            "issue recorded"
        );
        Configuration::current()
            .event_sink
            .post(Event::IssueRecorded(self.clone()));
    }

    /// The failed expectation, if this issue reports one.
    pub fn expectation(&self) -> Option<&Expectation> {
        match &self.kind {
            IssueKind::ExpectationFailed(expectation) => Some(&**expectation),
            IssueKind::Unconditional => None,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::ExpectationFailed(expectation) => {
                write!(
                    f,
                    "Expectation failed: {}",
                    expectation.evaluated_expression.expanded_description()
                )?;
                if let Some(mismatch) = expectation.mismatch_description() {
                    write!(f, ": {mismatch}")?;
                }
            }
            IssueKind::Unconditional => f.write_str("Issue recorded")?,
        }
        for comment in &self.comments {
            write!(f, "\n{comment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
