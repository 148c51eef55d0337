use super::*;
use std::cell::Cell;

use attest_reflect::DiffView;
use pretty_assertions::assert_eq;

/// A list that counts how often it is described or diffed.
struct Tracked {
    items: Vec<i32>,
    uses: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(items: Vec<i32>, uses: &Rc<Cell<usize>>) -> Self {
        Tracked {
            items,
            uses: Rc::clone(uses),
        }
    }
}

impl Reflect for Tracked {
    fn test_description(&self) -> String {
        self.uses.set(self.uses.get() + 1);
        self.items.test_description()
    }

    fn diff_view(&self) -> DiffView<'_> {
        self.uses.set(self.uses.get() + 1);
        self.items.diff_view()
    }
}

fn comparison_sources() -> Vec<(ExpressionId, Expression)> {
    vec![
        (
            ExpressionId::ROOT,
            Expression::binary_operation(Expression::generic("xs"), "==", Expression::generic("ys")),
        ),
        (ExpressionId::from_packed(1), Expression::generic("xs")),
        (ExpressionId::from_packed(2), Expression::generic("ys")),
    ]
}

fn compare_tracked(lhs: Vec<i32>, rhs: Vec<i32>, uses: &Rc<Cell<usize>>) -> (bool, Expression) {
    let mut context = ExpectationContext::new(comparison_sources());
    let result = context.compare(
        |lhs: &Tracked, rhs: &Tracked| lhs.items == rhs.items,
        ExpressionId::ROOT,
        Tracked::new(lhs, uses),
        ExpressionId::from_packed(1),
        Tracked::new(rhs, uses),
        ExpressionId::from_packed(2),
    );
    (result, context.finalize(result))
}

#[test]
fn passing_comparison_describes_nothing() {
    let uses = Rc::new(Cell::new(0));
    let (result, expression) = compare_tracked(vec![1, 2], vec![1, 2], &uses);
    assert!(result);
    assert_eq!(uses.get(), 0);
    assert_eq!(expression.runtime_value, None);
    assert_eq!(expression.expanded_description(), "xs == ys");
}

#[test]
fn failing_comparison_records_values_and_difference() {
    let uses = Rc::new(Cell::new(0));
    let (result, expression) = compare_tracked(vec![1, 2, 3], vec![1, 3], &uses);
    assert!(!result);
    assert!(uses.get() > 0);
    assert_eq!(
        expression.expanded_description(),
        "(xs → [1, 2, 3]) == (ys → [1, 3])"
    );
    assert_eq!(
        expression.difference_description.as_deref(),
        Some("removed [2]")
    );
}

#[test]
fn passing_values_are_not_captured_by_default() {
    let _config = Configuration::buffered().install();
    assert!(!ExpectationContext::new(comparison_sources()).captures_passing_values());
}

#[test]
fn difference_is_keyed_by_the_comparison() {
    let mut context = ExpectationContext::new(vec![
        (
            ExpressionId::ROOT,
            Expression::negation(Expression::generic("xs == ys"), true),
        ),
        (
            ExpressionId::from_packed(1),
            Expression::binary_operation(Expression::generic("xs"), "==", Expression::generic("ys")),
        ),
    ]);
    let equal = context.compare(
        |lhs: &Vec<i32>, rhs: &Vec<i32>| lhs == rhs,
        ExpressionId::from_packed(1),
        vec![1, 2],
        ExpressionId::pack(&[0, 0]),
        vec![2],
        ExpressionId::pack(&[0, 1]),
    );
    assert!(!equal);
    let expression = context.finalize(false);
    assert_eq!(expression.difference_description, None);
    assert_eq!(
        expression.differences(),
        vec![("xs == ys".to_owned(), "removed [1]")]
    );
}

#[test]
fn passing_values_are_captured_when_reported() {
    let _config = Configuration {
        deliver_expectation_checked_events: true,
        ..Configuration::buffered()
    }
    .install();
    assert!(ExpectationContext::new(comparison_sources()).captures_passing_values());
    let uses = Rc::new(Cell::new(0));
    let (result, expression) = compare_tracked(vec![4], vec![4], &uses);
    assert!(result);
    assert_eq!(
        expression.expanded_description(),
        "(xs → [4]) == (ys → [4])"
    );
    assert_eq!(expression.difference_description, None);
}

#[test]
fn capture_value_passes_through() {
    let mut context = ExpectationContext::from_source_text([(ExpressionId::ROOT, "n + 1")]);
    let n = context.capture_value(41, ExpressionId::ROOT) + 1;
    assert_eq!(n, 42);
    let expression = context.finalize(false);
    assert_eq!(expression.expanded_description(), "n + 1 → 41");
}

#[test]
fn capture_ref_borrows() {
    let names = vec![String::from("ann"), String::from("bo")];
    let mut context = ExpectationContext::from_source_text([
        (ExpressionId::ROOT, "names.is_empty()"),
        (ExpressionId::from_packed(1), "names"),
    ]);
    let captured = context.capture_ref(&names, ExpressionId::from_packed(1));
    let empty = context.capture_value(captured.is_empty(), ExpressionId::ROOT);
    assert!(!empty);
    let expression = context.finalize(empty);
    assert_eq!(
        expression.expanded_description(),
        "(names → [\"ann\", \"bo\"]).is_empty()"
    );
}

#[test]
fn negated_condition_shows_inner_value() {
    let done = true;
    let mut context = ExpectationContext::new([
        (
            ExpressionId::ROOT,
            Expression::negation(Expression::generic("done"), false),
        ),
        (ExpressionId::from_packed(1), Expression::generic("done")),
    ]);
    let result = context.capture_value(!done, ExpressionId::ROOT);
    let expression = context.finalize(result);
    assert_eq!(expression.expanded_description(), "!(done → true)");
}

#[test]
fn captures_without_source_are_dropped() {
    let mut context = ExpectationContext::from_source_text([(ExpressionId::ROOT, "flag")]);
    context.capture_value(7, ExpressionId::from_packed(1));
    let flag = context.capture_value(false, ExpressionId::ROOT);
    let expression = context.finalize(flag);
    assert!(expression.subexpressions().is_empty());
}

#[test]
fn deferred_source_is_built_on_finalize() {
    let builds = Cell::new(0);
    let context = ExpectationContext::deferred(|| {
        builds.set(builds.get() + 1);
        vec![(ExpressionId::ROOT, Expression::generic("ready"))]
    });
    assert_eq!(builds.get(), 0);
    let expression = context.finalize(true);
    assert_eq!(builds.get(), 1);
    assert_eq!(expression.source_code(), "ready");
}

#[test]
fn failed_cast_records_actual_type() {
    let subject: i32 = 5;
    let mut context = ExpectationContext::from_source_text([
        (ExpressionId::ROOT, "subject as String"),
        (ExpressionId::from_packed(1), "subject"),
        (ExpressionId::from_packed(2), "String"),
    ]);
    let cast = context.cast_as::<String>(
        &subject,
        ExpressionId::from_packed(1),
        ExpressionId::from_packed(2),
    );
    assert_eq!(cast, None);
    let expression = context.finalize(false);
    let descriptions: Vec<_> = expression
        .subexpressions()
        .into_iter()
        .map(|sub| sub.runtime_value.as_ref().map(|value| value.description.clone()))
        .collect();
    assert_eq!(
        descriptions,
        vec![Some("5".to_owned()), Some("i32".to_owned())]
    );
}

#[test]
fn successful_cast_skips_type() {
    let subject = String::from("text");
    let mut context = ExpectationContext::from_source_text([
        (ExpressionId::ROOT, "subject is String"),
        (ExpressionId::from_packed(1), "subject"),
        (ExpressionId::from_packed(2), "String"),
    ]);
    assert_eq!(
        context
            .cast_as::<String>(
                &subject,
                ExpressionId::from_packed(1),
                ExpressionId::from_packed(2)
            )
            .map(String::as_str),
        Some("text")
    );
    assert!(context.is_instance::<String>(
        &subject,
        ExpressionId::from_packed(1),
        ExpressionId::from_packed(2)
    ));
    let expression = context.finalize(false);
    assert_eq!(expression.subexpressions()[1].runtime_value, None);
}

#[test]
fn is_instance_mismatch_records_actual_type() {
    let subject = vec![1u8];
    let mut context = ExpectationContext::from_source_text([
        (ExpressionId::ROOT, "subject is String"),
        (ExpressionId::from_packed(2), "String"),
    ]);
    assert!(!context.is_instance::<String>(
        &subject,
        ExpressionId::from_packed(1),
        ExpressionId::from_packed(2)
    ));
    let expression = context.finalize(false);
    assert_eq!(
        expression.subexpressions()[0]
            .runtime_value
            .as_ref()
            .map(|value| value.description.as_str()),
        Some("Vec<u8>")
    );
}
