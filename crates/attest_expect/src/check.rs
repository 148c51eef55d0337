//! Check entry points.
//!
//! Every expansion of an expectation macro ends in one of these functions.
//! They all funnel into [`check`], which records the issue for a failed
//! expectation and returns a `Result`; the call site decides whether a
//! failure stops the test (`require!`) or not (`expect!`).
//!
//! Errors thrown by a condition are never turned into expectation failures.
//! Fallible conditions go through [`try_check_condition`], whose outer
//! `Result` carries the condition's own error untouched.

use std::error::Error;
use std::future::Future;

use attest_diagnostic::{
    Backtrace, Comment, Configuration, Event, Expectation, Issue, IssueKind, SourceContext,
};
use attest_expr::Expression;
use attest_ir::{ExpressionId, SourceLocation};
use tracing::debug;

use crate::error_match::{self, ErrorMatch};
use crate::{BoxError, ExpectationContext, ExpectationFailedError};

/// Where an expectation is written and how it reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectationSite {
    pub comments: Vec<Comment>,
    /// Whether failing stops the test.
    pub is_required: bool,
    pub source_location: SourceLocation,
}

impl ExpectationSite {
    pub fn new(source_location: SourceLocation) -> Self {
        ExpectationSite {
            comments: Vec::new(),
            is_required: false,
            source_location,
        }
    }

    /// A site at the caller's location.
    #[track_caller]
    pub fn here() -> Self {
        Self::new(SourceLocation::caller())
    }

    #[must_use]
    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<Comment>) -> Self {
        self.comments.push(comment.into());
        self
    }

    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments.extend(comments);
        self
    }
}

/// Explanations for expectations about errors or exits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mismatch {
    pub error_description: Option<String>,
    pub exit_condition_description: Option<String>,
}

impl Mismatch {
    pub fn error(description: impl Into<String>) -> Self {
        Mismatch {
            error_description: Some(description.into()),
            exit_condition_description: None,
        }
    }

    pub fn exit_condition(description: impl Into<String>) -> Self {
        Mismatch {
            error_description: None,
            exit_condition_description: Some(description.into()),
        }
    }
}

/// Settle an evaluated expectation.
///
/// A pass returns at once without describing anything, unless
/// checked-expectation events are enabled, in which case the finalized
/// expectation is posted. A failure records an issue carrying the
/// finalized expression, the site's comments and a backtrace, and returns
/// the expectation inside the error.
#[tracing::instrument(level = "trace", skip_all)]
pub fn check(
    condition: bool,
    context: ExpectationContext<'_>,
    mismatch: Mismatch,
    site: &ExpectationSite,
) -> Result<(), ExpectationFailedError> {
    if condition {
        pass(context, site);
        Ok(())
    } else {
        Err(fail(context, mismatch, site))
    }
}

fn pass(context: ExpectationContext<'_>, site: &ExpectationSite) {
    let config = Configuration::current();
    if !config.deliver_expectation_checked_events {
        return;
    }
    let expectation = Expectation {
        evaluated_expression: context.finalize(true),
        mismatched_error_description: None,
        mismatched_exit_condition_description: None,
        is_passing: true,
        is_required: site.is_required,
        source_location: site.source_location,
    };
    config
        .event_sink
        .post(Event::ExpectationChecked(expectation));
}

fn fail(
    context: ExpectationContext<'_>,
    mismatch: Mismatch,
    site: &ExpectationSite,
) -> ExpectationFailedError {
    let config = Configuration::current();
    let expectation = Expectation {
        evaluated_expression: context.finalize(false),
        mismatched_error_description: mismatch.error_description,
        mismatched_exit_condition_description: mismatch.exit_condition_description,
        is_passing: false,
        is_required: site.is_required,
        source_location: site.source_location,
    };
    debug!(
        location = %site.source_location,
        required = site.is_required,
        "expectation failed"
    );

    if config.deliver_expectation_checked_events {
        config
            .event_sink
            .post(Event::ExpectationChecked(expectation.clone()));
    }
    let source_context = SourceContext {
        backtrace: config.capture_backtraces.then(Backtrace::capture),
        source_location: Some(site.source_location),
    };
    Issue::new(
        IssueKind::ExpectationFailed(Box::new(expectation.clone())),
        site.comments.clone(),
        source_context,
    )
    .post();
    ExpectationFailedError::new(expectation)
}

/// Check a boolean condition evaluated against `context`.
pub fn check_condition<'a>(
    mut context: ExpectationContext<'a>,
    site: &ExpectationSite,
    condition: impl FnOnce(&mut ExpectationContext<'a>) -> bool,
) -> Result<(), ExpectationFailedError> {
    let result = condition(&mut context);
    check(result, context, Mismatch::default(), site)
}

/// Check a condition that may fail with its own error.
///
/// The outer `Err` is the condition's error, returned as is and with no
/// issue recorded; the inner result is the expectation's.
pub fn try_check_condition<'a, E>(
    mut context: ExpectationContext<'a>,
    site: &ExpectationSite,
    condition: impl FnOnce(&mut ExpectationContext<'a>) -> Result<bool, E>,
) -> Result<Result<(), ExpectationFailedError>, E> {
    let result = condition(&mut context)?;
    Ok(check(result, context, Mismatch::default(), site))
}

/// Check a condition that has to be awaited.
///
/// The condition owns the context while it runs and hands it back with
/// the result.
pub async fn check_condition_async<'a, F, Fut>(
    context: ExpectationContext<'a>,
    site: &ExpectationSite,
    condition: F,
) -> Result<(), ExpectationFailedError>
where
    F: FnOnce(ExpectationContext<'a>) -> Fut,
    Fut: Future<Output = (ExpectationContext<'a>, bool)>,
{
    let (context, result) = condition(context).await;
    check(result, context, Mismatch::default(), site)
}

/// Unwrap an optional, failing when it is `None`.
pub fn check_optional<'a, T>(
    mut context: ExpectationContext<'a>,
    site: &ExpectationSite,
    optional: impl FnOnce(&mut ExpectationContext<'a>) -> Option<T>,
) -> Result<T, ExpectationFailedError> {
    let value = optional(&mut context);
    settle_optional(value, context, site)
}

/// Unwrap an optional that has to be awaited.
pub async fn check_optional_async<'a, T, F, Fut>(
    context: ExpectationContext<'a>,
    site: &ExpectationSite,
    optional: F,
) -> Result<T, ExpectationFailedError>
where
    F: FnOnce(ExpectationContext<'a>) -> Fut,
    Fut: Future<Output = (ExpectationContext<'a>, Option<T>)>,
{
    let (context, value) = optional(context).await;
    settle_optional(value, context, site)
}

fn settle_optional<T>(
    value: Option<T>,
    context: ExpectationContext<'_>,
    site: &ExpectationSite,
) -> Result<T, ExpectationFailedError> {
    match value {
        Some(value) => {
            pass(context, site);
            Ok(value)
        }
        None => Err(fail(context, Mismatch::default(), site)),
    }
}

/// Check a plain boolean whose expression was built by hand.
pub fn check_value(
    value: bool,
    expression: Expression,
    site: &ExpectationSite,
) -> Result<(), ExpectationFailedError> {
    let mut context = ExpectationContext::new([(ExpressionId::ROOT, expression)]);
    context.capture_value(value, ExpressionId::ROOT);
    check(value, context, Mismatch::default(), site)
}

/// Expect `body` to fail with an error of type `E`, and return that error.
pub fn check_throws_type<'a, E, T>(
    mut context: ExpectationContext<'a>,
    site: &ExpectationSite,
    body: impl FnOnce(&mut ExpectationContext<'a>) -> Result<T, BoxError>,
) -> Result<Box<E>, ExpectationFailedError>
where
    E: Error + 'static,
{
    let outcome = body(&mut context);
    settle_match(error_match::match_type::<E, T>(outcome), context, site)
}

/// Expect `body` to fail with an error equal to `expected`.
pub fn check_throws_instance<'a, E, T>(
    mut context: ExpectationContext<'a>,
    site: &ExpectationSite,
    expected: &E,
    body: impl FnOnce(&mut ExpectationContext<'a>) -> Result<T, BoxError>,
) -> Result<BoxError, ExpectationFailedError>
where
    E: Error + PartialEq + 'static,
{
    let outcome = body(&mut context);
    settle_match(error_match::match_instance(expected, outcome), context, site)
}

/// Expect `body` to fail with an error that `matcher` accepts.
///
/// An error returned by `matcher` is reported as a mismatch.
pub fn check_throws_matching<'a, T>(
    mut context: ExpectationContext<'a>,
    site: &ExpectationSite,
    body: impl FnOnce(&mut ExpectationContext<'a>) -> Result<T, BoxError>,
    matcher: impl FnOnce(&BoxError) -> Result<bool, BoxError>,
) -> Result<BoxError, ExpectationFailedError> {
    let outcome = body(&mut context);
    settle_match(error_match::match_predicate(outcome, matcher), context, site)
}

/// Expect `body` to succeed, and return its value.
pub fn check_does_not_throw<'a, T>(
    mut context: ExpectationContext<'a>,
    site: &ExpectationSite,
    body: impl FnOnce(&mut ExpectationContext<'a>) -> Result<T, BoxError>,
) -> Result<T, ExpectationFailedError> {
    let outcome = body(&mut context);
    settle_match(error_match::match_success(outcome), context, site)
}

fn settle_match<T>(
    found: ErrorMatch<T>,
    context: ExpectationContext<'_>,
    site: &ExpectationSite,
) -> Result<T, ExpectationFailedError> {
    match found.matched {
        Some(matched) => {
            pass(context, site);
            Ok(matched)
        }
        None => {
            let mismatch = Mismatch {
                error_description: found.mismatch,
                exit_condition_description: None,
            };
            Err(fail(context, mismatch, site))
        }
    }
}
