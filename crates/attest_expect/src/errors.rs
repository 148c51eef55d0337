//! Errors surfaced by check entry points.

use attest_diagnostic::Expectation;

/// An error value under test, as thrown by a condition or a matcher.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Returned by a check whose expectation did not hold.
///
/// The issue has already been recorded when this is returned; callers only
/// decide whether the test stops.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Expectation failed: {}", .expectation.evaluated_expression.expanded_description())]
pub struct ExpectationFailedError {
    expectation: Box<Expectation>,
}

impl ExpectationFailedError {
    pub fn new(expectation: Expectation) -> Self {
        ExpectationFailedError {
            expectation: Box::new(expectation),
        }
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    pub fn into_expectation(self) -> Expectation {
        *self.expectation
    }
}
