//! Failure reports as a person reads them.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use attest_diagnostic::{ColorMode, IssueEmitter};
use attest_expect::{
    check_throws_type, expect_eq, BoxError, Configuration, ExpectationContext, ExpectationSite,
    ExpressionId, Issue, SharedEventSink,
};

fn record(failing: impl FnOnce()) -> Vec<Issue> {
    let configuration = Configuration::buffered();
    let sink = SharedEventSink::clone(&configuration.event_sink);
    let _guard = configuration.install();
    failing();
    sink.as_buffer().expect("buffer sink").issues()
}

fn render(issue: &Issue) -> String {
    let mut emitter = IssueEmitter::new(Vec::new(), ColorMode::Never, false);
    emitter.emit(issue);
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn comparison_report_lists_values_difference_and_comment() {
    let issues = record(|| {
        let xs = vec![1, 2, 3];
        let ys = vec![1, 3];
        expect_eq!(xs, ys, "lists should match");
    });
    let report = render(&issues[0]);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(
        lines[0],
        "Expectation failed: (xs → [1, 2, 3]) == (ys → [1, 3])"
    );
    assert!(lines[1].starts_with("  --> "));
    assert!(lines[1].contains("reporting.rs:"));
    assert_eq!(lines[2], "   = xs == ys: removed [2]");
    assert_eq!(lines[3], "   = note: lists should match");
}

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct Refused;

#[derive(Debug, thiserror::Error)]
#[error("timed out")]
struct TimedOut;

#[test]
fn error_mismatch_is_appended() {
    let issues = record(|| {
        let context = ExpectationContext::from_source_text([(ExpressionId::ROOT, "connect()")]);
        let result = check_throws_type::<TimedOut, ()>(context, &ExpectationSite::here(), |_| {
            Err::<(), BoxError>(Box::new(Refused))
        });
        assert!(result.is_err());
    });
    let report = render(&issues[0]);
    assert_eq!(
        report.lines().next(),
        Some(
            "Expectation failed: connect(): expected error of type TimedOut, \
             but \"connection refused\" was thrown instead"
        )
    );
}

#[test]
fn large_collections_are_elided() {
    let issues = record(|| {
        let big: Vec<u32> = (0..50).collect();
        expect_eq!(big, Vec::<u32>::new());
    });
    let expectation = issues[0].expectation().unwrap();
    let lhs = &expectation.evaluated_expression.subexpressions()[0];
    let value = lhs.runtime_value.as_ref().unwrap();
    let children = value.children.as_ref().unwrap();
    assert_eq!(children.len(), 11);
    assert_eq!(
        children[10].description,
        "(40 out of 50 elements omitted for brevity)"
    );
}
