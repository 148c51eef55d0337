use super::*;
use crate::{IssueKind, SourceContext};

fn unconditional(note: &str) -> Event {
    Event::IssueRecorded(Issue::new(
        IssueKind::Unconditional,
        vec![note.into()],
        SourceContext::default(),
    ))
}

#[test]
fn buffer_keeps_events_in_order() {
    let sink = EventSink::buffer();
    sink.post(unconditional("first"));
    sink.post(unconditional("second"));

    let buffer = sink.as_buffer();
    assert_eq!(buffer.map(BufferEventSink::len), Some(2));
    let notes: Vec<String> = buffer
        .map(BufferEventSink::issues)
        .unwrap_or_default()
        .iter()
        .map(|issue| issue.comments[0].text.clone())
        .collect();
    assert_eq!(notes, vec!["first", "second"]);
}

#[test]
fn buffer_can_be_cleared() {
    let buffer = BufferEventSink::new();
    buffer.post(unconditional("x"));
    assert!(!buffer.is_empty());
    buffer.clear();
    assert!(buffer.is_empty());
    assert!(buffer.checked_expectations().is_empty());
}

#[test]
fn silent_sink_drops_everything() {
    let sink = EventSink::silent();
    sink.post(unconditional("dropped"));
    assert!(sink.as_buffer().is_none());
}
