//! Expectation macros.
//!
//! Each expands into a context built from the stringified operands and a
//! call into the check entry points. `expect!`-style macros evaluate to
//! whether the expectation held and keep going; `require!`-style macros
//! return the failure from the enclosing function with `?`.
//!
//! ```ignore
//! expect!(list.is_empty(), "list should start empty");
//! require_eq!(parsed, expected);
//! ```

/// Check a condition, recording an issue when it is false.
///
/// Evaluates to `true` when the condition held. Trailing arguments are a
/// `format!` comment attached to the issue.
#[macro_export]
macro_rules! expect {
    ($condition:expr $(,)?) => {
        $crate::__held(&$crate::__check_condition!($condition, false, ::std::vec::Vec::new()))
    };
    ($condition:expr, $($comment:tt)+) => {
        $crate::__held(&$crate::__check_condition!(
            $condition,
            false,
            ::std::vec![$crate::Comment::new(::std::format!($($comment)+))]
        ))
    };
}

/// Check a condition, returning the failure from the enclosing function
/// when it is false.
#[macro_export]
macro_rules! require {
    ($condition:expr $(,)?) => {
        $crate::__check_condition!($condition, true, ::std::vec::Vec::new())?
    };
    ($condition:expr, $($comment:tt)+) => {
        $crate::__check_condition!(
            $condition,
            true,
            ::std::vec![$crate::Comment::new(::std::format!($($comment)+))]
        )?
    };
}

/// Check that two values are equal, showing both values and their
/// difference on failure.
///
/// Evaluates to `true` when they were equal.
#[macro_export]
macro_rules! expect_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__held(&$crate::__check_equal!($lhs, $rhs, false, ::std::vec::Vec::new()))
    };
    ($lhs:expr, $rhs:expr, $($comment:tt)+) => {
        $crate::__held(&$crate::__check_equal!(
            $lhs,
            $rhs,
            false,
            ::std::vec![$crate::Comment::new(::std::format!($($comment)+))]
        ))
    };
}

/// Check that two values are equal, returning the failure from the
/// enclosing function when they are not.
#[macro_export]
macro_rules! require_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__check_equal!($lhs, $rhs, true, ::std::vec::Vec::new())?
    };
    ($lhs:expr, $rhs:expr, $($comment:tt)+) => {
        $crate::__check_equal!(
            $lhs,
            $rhs,
            true,
            ::std::vec![$crate::Comment::new(::std::format!($($comment)+))]
        )?
    };
}

/// Whether a checked expectation held.
///
/// Not `#[must_use]`: `expect!` is usually written as a statement.
#[doc(hidden)]
#[allow(clippy::must_use_candidate, reason = "expect! is usually a statement")]
pub fn __held(outcome: &Result<(), crate::ExpectationFailedError>) -> bool {
    outcome.is_ok()
}

#[doc(hidden)]
#[macro_export]
macro_rules! __expectation_site {
    ($required:expr, $comments:expr) => {
        $crate::ExpectationSite::new($crate::SourceLocation::new(
            ::std::file!(),
            ::std::line!(),
            ::std::column!(),
        ))
        .required($required)
        .with_comments($comments)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_condition {
    ($condition:expr, $required:expr, $comments:expr) => {
        $crate::check_condition(
            $crate::ExpectationContext::from_source_text([(
                $crate::ExpressionId::ROOT,
                ::std::stringify!($condition),
            )]),
            &$crate::__expectation_site!($required, $comments),
            |context| context.capture_value($condition, $crate::ExpressionId::ROOT),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_equal {
    ($lhs:expr, $rhs:expr, $required:expr, $comments:expr) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => $crate::check_condition(
                $crate::ExpectationContext::deferred(|| {
                    ::std::vec![
                        (
                            $crate::ExpressionId::ROOT,
                            $crate::Expression::binary_operation(
                                $crate::Expression::generic(::std::stringify!($lhs)),
                                "==",
                                $crate::Expression::generic(::std::stringify!($rhs)),
                            ),
                        ),
                        (
                            $crate::ExpressionId::from_packed(1),
                            $crate::Expression::generic(::std::stringify!($lhs)),
                        ),
                        (
                            $crate::ExpressionId::from_packed(2),
                            $crate::Expression::generic(::std::stringify!($rhs)),
                        ),
                    ]
                }),
                &$crate::__expectation_site!($required, $comments),
                |context| {
                    context.compare(
                        |lhs, rhs| *lhs == *rhs,
                        $crate::ExpressionId::ROOT,
                        lhs,
                        $crate::ExpressionId::from_packed(1),
                        rhs,
                        $crate::ExpressionId::from_packed(2),
                    )
                },
            ),
        }
    };
}
