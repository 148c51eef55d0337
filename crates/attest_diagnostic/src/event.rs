//! Event delivery.
//!
//! Checked expectations and recorded issues are posted to an [`EventSink`]:
//! - Stderr: issues printed through the terminal emitter (default)
//! - Buffer: every event kept for later inspection (tests, tooling)
//! - Silent: everything dropped
//!
//! # Performance
//! Uses enum dispatch, like the other handlers in this workspace; posting
//! happens once per checked expectation.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{ColorMode, Expectation, Issue, IssueEmitter};

/// Something that happened while checking expectations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// An expectation was checked, passing or not. Only posted when
    /// checked-expectation events are enabled.
    ExpectationChecked(Expectation),
    /// An issue was recorded.
    IssueRecorded(Issue),
}

/// Prints recorded issues to stderr.
#[derive(Default)]
pub struct StderrEventSink {
    color_mode: ColorMode,
}

impl StderrEventSink {
    pub fn new(color_mode: ColorMode) -> Self {
        StderrEventSink { color_mode }
    }

    pub fn post(&self, event: &Event) {
        if let Event::IssueRecorded(issue) = event {
            let stderr = io::stderr();
            let is_terminal = stderr.is_terminal();
            IssueEmitter::new(stderr.lock(), self.color_mode, is_terminal).emit(issue);
        }
    }
}

/// Keeps every posted event.
#[derive(Default)]
pub struct BufferEventSink {
    events: Mutex<Vec<Event>>,
}

impl BufferEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, event: Event) {
        self.events.lock().push(event);
    }

    /// All events posted so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Recorded issues, oldest first.
    pub fn issues(&self) -> Vec<Issue> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::IssueRecorded(issue) => Some(issue.clone()),
                Event::ExpectationChecked(_) => None,
            })
            .collect()
    }

    /// Checked expectations, oldest first.
    pub fn checked_expectations(&self) -> Vec<Expectation> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::ExpectationChecked(expectation) => Some(expectation.clone()),
                Event::IssueRecorded(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// Event sink implementation using enum dispatch.
pub enum EventSink {
    /// Prints issues to stderr (default).
    Stderr(StderrEventSink),
    /// Captures events to a buffer.
    Buffer(BufferEventSink),
    /// Discards every event.
    Silent,
}

impl EventSink {
    /// Deliver `event`.
    pub fn post(&self, event: Event) {
        match self {
            Self::Stderr(sink) => sink.post(&event),
            Self::Buffer(sink) => sink.post(event),
            Self::Silent => {}
        }
    }

    /// The buffer, if this sink captures events.
    pub fn as_buffer(&self) -> Option<&BufferEventSink> {
        match self {
            Self::Buffer(sink) => Some(sink),
            Self::Stderr(_) | Self::Silent => None,
        }
    }

    /// A shared stderr sink with automatic color detection.
    pub fn stderr() -> SharedEventSink {
        Arc::new(EventSink::Stderr(StderrEventSink::default()))
    }

    /// A shared buffering sink.
    pub fn buffer() -> SharedEventSink {
        Arc::new(EventSink::Buffer(BufferEventSink::new()))
    }

    /// A shared sink that drops everything.
    pub fn silent() -> SharedEventSink {
        Arc::new(EventSink::Silent)
    }
}

/// Event sink shared between configurations and threads.
pub type SharedEventSink = Arc<EventSink>;

#[cfg(test)]
mod tests;
