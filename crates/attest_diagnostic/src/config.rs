//! Per-thread configuration.
//!
//! Expectations read the configuration of the thread they run on. Tests
//! install their own with [`Configuration::install`]; the previous one comes
//! back when the returned guard drops. Threads that never install one use
//! [`Configuration::default`].
//!
//! # Environment
//!
//! [`Configuration::from_env`] reads:
//! - `ATTEST_MAX_CHILD_DEPTH` - deepest described child level
//! - `ATTEST_MAX_COLLECTION_COUNT` - most described collection elements
//! - `ATTEST_EXPECTATION_CHECKED_EVENTS` - post an event for every check
//! - `ATTEST_BACKTRACE` - capture backtraces for recorded issues

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use attest_reflect::ReflectOptions;

use crate::{EventSink, SharedEventSink};

const MAX_CHILD_DEPTH: &str = "ATTEST_MAX_CHILD_DEPTH";
const MAX_COLLECTION_COUNT: &str = "ATTEST_MAX_COLLECTION_COUNT";
const EXPECTATION_CHECKED_EVENTS: &str = "ATTEST_EXPECTATION_CHECKED_EVENTS";
const BACKTRACE: &str = "ATTEST_BACKTRACE";

/// An environment variable held a value that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{variable} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        variable: &'static str,
        value: String,
    },
    #[error("{variable} must be one of 1/0, true/false, yes/no, on/off, got {value:?}")]
    InvalidFlag {
        variable: &'static str,
        value: String,
    },
}

/// Knobs for expectation checking.
#[derive(Clone)]
pub struct Configuration {
    /// Limits for runtime value snapshots.
    pub reflection: ReflectOptions,
    /// Post an event for every checked expectation, and capture runtime
    /// values for passing expectations too.
    pub deliver_expectation_checked_events: bool,
    /// Capture a backtrace for every recorded issue.
    pub capture_backtraces: bool,
    /// Where events go.
    pub event_sink: SharedEventSink,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            reflection: ReflectOptions::default(),
            deliver_expectation_checked_events: false,
            capture_backtraces: true,
            event_sink: EventSink::stderr(),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("reflection", &self.reflection)
            .field(
                "deliver_expectation_checked_events",
                &self.deliver_expectation_checked_events,
            )
            .field("capture_backtraces", &self.capture_backtraces)
            .finish_non_exhaustive()
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Configuration>> = const { RefCell::new(None) };
}

impl Configuration {
    /// Defaults with every event captured to a fresh buffer and no
    /// backtraces. Inspect it through `event_sink.as_buffer()`.
    pub fn buffered() -> Self {
        Configuration {
            capture_backtraces: false,
            event_sink: EventSink::buffer(),
            ..Configuration::default()
        }
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Defaults overridden by whatever `lookup` returns per variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Configuration::default();
        if let Some(value) = lookup(MAX_CHILD_DEPTH) {
            config.reflection.max_child_depth = parse_number(MAX_CHILD_DEPTH, &value)?;
        }
        if let Some(value) = lookup(MAX_COLLECTION_COUNT) {
            config.reflection.max_collection_count = parse_number(MAX_COLLECTION_COUNT, &value)?;
        }
        if let Some(value) = lookup(EXPECTATION_CHECKED_EVENTS) {
            config.deliver_expectation_checked_events =
                parse_flag(EXPECTATION_CHECKED_EVENTS, &value)?;
        }
        if let Some(value) = lookup(BACKTRACE) {
            config.capture_backtraces = parse_flag(BACKTRACE, &value)?;
        }
        Ok(config)
    }

    /// The configuration of the current thread.
    pub fn current() -> Configuration {
        CURRENT.with(|current| {
            current
                .borrow_mut()
                .get_or_insert_with(Configuration::default)
                .clone()
        })
    }

    /// Make this the current thread's configuration until the guard drops.
    #[must_use = "the configuration is uninstalled when the guard drops"]
    pub fn install(self) -> ConfigurationGuard {
        let previous = CURRENT.with(|current| current.borrow_mut().replace(self));
        ConfigurationGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

/// Restores the previously installed configuration on drop.
pub struct ConfigurationGuard {
    previous: Option<Configuration>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ConfigurationGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

fn parse_number(variable: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            variable,
            value: value.to_owned(),
        })
}

fn parse_flag(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            variable,
            value: value.to_owned(),
        }),
    }
}
