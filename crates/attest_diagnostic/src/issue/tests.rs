use super::*;
use attest_expr::Expression;
use attest_reflect::Value;
use crate::BufferEventSink;

fn failed(expression: Expression) -> Issue {
    Issue::new(
        IssueKind::ExpectationFailed(Box::new(Expectation {
            evaluated_expression: expression,
            mismatched_error_description: None,
            mismatched_exit_condition_description: None,
            is_passing: false,
            is_required: false,
            source_location: SourceLocation::new("tests/math.rs", 3, 5),
        })),
        vec![],
        SourceContext::default(),
    )
}

#[test]
fn display_shows_expanded_expression() {
    let expression = Expression::generic("x")
        .capturing_runtime_value(Value::reflecting(&4, &Default::default()));
    assert_eq!(failed(expression).to_string(), "Expectation failed: x → 4");
}

#[test]
fn display_appends_mismatch_and_comments() {
    let mut issue = failed(Expression::generic("parse()"));
    if let IssueKind::ExpectationFailed(expectation) = &mut issue.kind {
        expectation.mismatched_error_description = Some("no error was thrown".to_owned());
    }
    issue.comments.push(Comment::from("parsing must fail"));
    assert_eq!(
        issue.to_string(),
        "Expectation failed: parse(): no error was thrown\nparsing must fail"
    );
}

#[test]
fn unconditional_issues_are_posted() {
    let config = Configuration::buffered();
    let sink = config.event_sink.clone();
    let _guard = config.install();

    let issue = Issue::record(vec![Comment::new("unreachable")]);
    assert_eq!(issue.to_string(), "Issue recorded\nunreachable");
    assert!(issue.expectation().is_none());
    assert!(issue.source_context.backtrace.is_none());
    assert_eq!(
        issue.source_context.source_location.map(|location| location.file_name()),
        Some("tests.rs")
    );

    let issues = sink.as_buffer().map(BufferEventSink::issues).unwrap_or_default();
    assert_eq!(issues, vec![issue]);
}

#[test]
fn source_contexts_ignore_backtraces() {
    let location = SourceLocation::new("a.rs", 1, 1);
    let with = SourceContext {
        backtrace: Some(Backtrace::capture()),
        source_location: Some(location),
    };
    let without = SourceContext {
        backtrace: None,
        source_location: Some(location),
    };
    assert_eq!(with, without);
}
