//! One evaluated expectation.

use attest_expr::Expression;
use attest_ir::SourceLocation;

/// The outcome of evaluating one expectation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expectation {
    /// The condition, with runtime values when they were captured.
    pub evaluated_expression: Expression,
    /// Why a thrown error did not match, for error expectations.
    pub mismatched_error_description: Option<String>,
    /// Why a process exit did not match, for exit expectations.
    pub mismatched_exit_condition_description: Option<String>,
    pub is_passing: bool,
    /// Whether failing aborts the test.
    pub is_required: bool,
    pub source_location: SourceLocation,
}

impl Expectation {
    /// The first mismatch explanation, if any.
    pub fn mismatch_description(&self) -> Option<&str> {
        self.mismatched_error_description
            .as_deref()
            .or(self.mismatched_exit_condition_description.as_deref())
    }
}
