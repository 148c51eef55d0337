//! Attest Diagnostic - what a failed expectation turns into.
//!
//! This crate contains:
//! - `Expectation` - one evaluated assertion and its expression tree
//! - `Issue` - a recorded failure with comments and source context
//! - `Event` and `EventSink` - where checked expectations and issues go
//! - `Configuration` - per-thread knobs, optionally read from the environment
//! - `IssueEmitter` - human-readable terminal output
//!
//! # Design Philosophy
//!
//! - **Cheap on success**: nothing here runs for a passing expectation
//!   unless checked-expectation events were requested.
//! - **Never the crash site**: reporting a failure must not itself fail, so
//!   sinks swallow write errors.

mod backtrace;
mod comment;
mod config;
mod emitter;
mod event;
mod expectation;
mod issue;

pub use backtrace::Backtrace;
pub use comment::Comment;
pub use config::{ConfigError, Configuration, ConfigurationGuard};
pub use emitter::{ColorMode, IssueEmitter};
pub use event::{BufferEventSink, Event, EventSink, SharedEventSink, StderrEventSink};
pub use expectation::Expectation;
pub use issue::{Issue, IssueKind, SourceContext};
