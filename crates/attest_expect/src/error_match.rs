//! Classifying thrown errors for error expectations.
//!
//! Each matcher turns the outcome of a body into whether it matched and,
//! when it did not, a sentence explaining why. The check entry points feed
//! both into [`check`](crate::check).

use std::error::Error;

use attest_reflect::TypeInfo;

use crate::BoxError;

/// The result of classifying one outcome.
#[derive(Debug)]
pub(crate) struct ErrorMatch<T> {
    /// What the caller gets back on a match.
    pub matched: Option<T>,
    pub mismatch: Option<String>,
}

impl<T> ErrorMatch<T> {
    fn matched(value: T) -> Self {
        ErrorMatch {
            matched: Some(value),
            mismatch: None,
        }
    }

    fn mismatched(explanation: String) -> Self {
        ErrorMatch {
            matched: None,
            mismatch: Some(explanation),
        }
    }
}

pub(crate) const NOTHING_THROWN: &str = "an error was expected but none was thrown";

/// Matches when the body failed with an error of type `E`.
pub(crate) fn match_type<E, T>(outcome: Result<T, BoxError>) -> ErrorMatch<Box<E>>
where
    E: Error + 'static,
{
    match outcome {
        Ok(_) => ErrorMatch::mismatched(NOTHING_THROWN.to_owned()),
        Err(error) => match error.downcast::<E>() {
            Ok(error) => ErrorMatch::matched(error),
            Err(other) => ErrorMatch::mismatched(format!(
                "expected error of type {}, but \"{other}\" was thrown instead",
                TypeInfo::of::<E>()
            )),
        },
    }
}

/// Matches when the body failed with an error equal to `expected`.
pub(crate) fn match_instance<E, T>(
    expected: &E,
    outcome: Result<T, BoxError>,
) -> ErrorMatch<BoxError>
where
    E: Error + PartialEq + 'static,
{
    match outcome {
        Ok(_) => ErrorMatch::mismatched(NOTHING_THROWN.to_owned()),
        Err(error) => {
            if error.downcast_ref::<E>() == Some(expected) {
                ErrorMatch::matched(error)
            } else {
                ErrorMatch::mismatched(format!(
                    "expected error \"{expected}\", but \"{error}\" was thrown instead"
                ))
            }
        }
    }
}

/// Matches when the body failed and `matcher` accepts the error.
///
/// An error from `matcher` itself is reported as a mismatch rather than
/// propagated.
pub(crate) fn match_predicate<T>(
    outcome: Result<T, BoxError>,
    matcher: impl FnOnce(&BoxError) -> Result<bool, BoxError>,
) -> ErrorMatch<BoxError> {
    match outcome {
        Ok(_) => ErrorMatch::mismatched(NOTHING_THROWN.to_owned()),
        Err(error) => match matcher(&error) {
            Ok(true) => ErrorMatch::matched(error),
            Ok(false) => {
                ErrorMatch::mismatched(format!("\"{error}\" was thrown but did not match"))
            }
            Err(second) => ErrorMatch::mismatched(format!(
                "a second error \"{second}\" was thrown when checking error \"{error}\""
            )),
        },
    }
}

/// Matches when the body succeeded.
pub(crate) fn match_success<T>(outcome: Result<T, BoxError>) -> ErrorMatch<T> {
    match outcome {
        Ok(value) => ErrorMatch::matched(value),
        Err(error) => ErrorMatch::mismatched(format!(
            "an error was thrown when none was expected: \"{error}\""
        )),
    }
}
