//! Attest Expect - checking expectations.
//!
//! This crate is what expectation macros expand into. It contains:
//! - `ExpectationContext`: runtime values and differences captured while a
//!   condition runs, turned into an expression tree on failure
//! - `Difference`: line and element edit scripts between unequal operands
//! - check entry points (`check`, `check_condition`, `check_optional`,
//!   `check_throws_type`, ...) that record issues and return `Result`s
//! - `expect!`, `require!`, `expect_eq!`, `require_eq!`
//!
//! # Re-exports
//!
//! Everything generated code names is re-exported here, so expansions only
//! depend on this crate:
//! - `ExpressionId`, `SourceLocation` from `attest_ir`
//! - `Expression`, `Argument` from `attest_expr`
//! - `Reflect`, `Value` from `attest_reflect`
//! - `Comment`, `Configuration`, `Issue` and the event types from
//!   `attest_diagnostic`

mod check;
mod context;
mod diff;
mod error_match;
mod errors;
mod macros;

pub use check::{
    check, check_condition, check_condition_async, check_does_not_throw, check_optional,
    check_optional_async, check_throws_instance, check_throws_matching, check_throws_type,
    check_value, try_check_condition, ExpectationSite, Mismatch,
};
pub use context::ExpectationContext;
pub use diff::{Change, Difference};
pub use errors::{BoxError, ExpectationFailedError};
#[doc(hidden)]
pub use macros::__held;

pub use attest_diagnostic::{
    BufferEventSink, Comment, ConfigError, Configuration, ConfigurationGuard, Event, EventSink,
    Expectation, Issue, IssueKind, SharedEventSink,
};
pub use attest_expr::{Argument, DescriptionOptions, Expression, ExpressionKind};
pub use attest_ir::{ExpressionId, SourceLocation};
pub use attest_reflect::{impl_reflect_debug, impl_reflect_debug_eq, Reflect, ReflectOptions, Value};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=attest_expect=debug` or `RUST_LOG=attest_expr=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
