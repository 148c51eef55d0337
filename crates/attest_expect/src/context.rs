//! Expectation Context
//!
//! The state one expectation accumulates while its condition runs. Generated
//! code calls the capture methods once per sub-expression, in evaluation
//! order, with the IDs it assigned at expansion time. Every method hands its
//! input back so it can sit anywhere inside the condition.
//!
//! # Performance
//!
//! Nothing is described while the condition runs. Captures store closures;
//! [`ExpectationContext::finalize`] runs them only when the expectation
//! failed or passing expectations are being reported. A passing check with
//! reporting off never calls `finalize` at all.

use std::any::Any;
use std::rc::Rc;

use attest_diagnostic::Configuration;
use attest_expr::{squash, Expression};
use attest_ir::{ExpressionId, KeyedGraph};
use attest_reflect::{AnyReflect, Reflect, ReflectOptions, Value};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::Difference;

type Thunk<'a, T> = Box<dyn FnOnce() -> Option<T> + 'a>;

type SourceFragments = Vec<(ExpressionId, Expression)>;

enum SourceCode<'a> {
    Eager(SourceFragments),
    Deferred(Box<dyn FnOnce() -> SourceFragments + 'a>),
}

impl SourceCode<'_> {
    fn resolve(self) -> SourceFragments {
        match self {
            SourceCode::Eager(fragments) => fragments,
            SourceCode::Deferred(build) => build(),
        }
    }
}

/// Captured state for one expectation.
///
/// Exclusively owned by the evaluation that created it; `'a` bounds what
/// the deferred captures may borrow.
pub struct ExpectationContext<'a> {
    source_code: SourceCode<'a>,
    runtime_values: FxHashMap<ExpressionId, Thunk<'a, Value>>,
    differences: FxHashMap<ExpressionId, Thunk<'a, Difference>>,
    options: ReflectOptions,
    capture_passing: bool,
}

impl<'a> ExpectationContext<'a> {
    /// A context over source fragments keyed by ID.
    ///
    /// Reflection limits and whether passing expectations are reported come
    /// from the current thread's [`Configuration`].
    pub fn new(source_code: impl IntoIterator<Item = (ExpressionId, Expression)>) -> Self {
        Self::with_source(SourceCode::Eager(source_code.into_iter().collect()))
    }

    /// A context over plain source text keyed by ID.
    pub fn from_source_text<'s>(
        source_code: impl IntoIterator<Item = (ExpressionId, &'s str)>,
    ) -> Self {
        Self::new(
            source_code
                .into_iter()
                .map(|(id, source)| (id, Expression::generic(source))),
        )
    }

    /// A context whose source fragments are only built when the context is
    /// finalized.
    pub fn deferred(build: impl FnOnce() -> Vec<(ExpressionId, Expression)> + 'a) -> Self {
        Self::with_source(SourceCode::Deferred(Box::new(build)))
    }

    fn with_source(source_code: SourceCode<'a>) -> Self {
        let config = Configuration::current();
        ExpectationContext {
            source_code,
            runtime_values: FxHashMap::default(),
            differences: FxHashMap::default(),
            options: config.reflection,
            capture_passing: config.deliver_expectation_checked_events,
        }
    }

    /// Record `value` under `id` and hand it back.
    pub fn capture_value<T: Reflect + Clone + 'a>(&mut self, value: T, id: ExpressionId) -> T {
        let captured = value.clone();
        let options = self.options;
        self.runtime_values.insert(
            id,
            Box::new(move || Some(Value::reflecting(&captured, &options))),
        );
        value
    }

    /// Record the value behind `value` under `id` without cloning it.
    pub fn capture_ref<T: Reflect>(&mut self, value: &'a T, id: ExpressionId) -> &'a T {
        self.capture_dyn(value, id);
        value
    }

    fn capture_dyn(&mut self, value: &'a dyn Reflect, id: ExpressionId) {
        let options = self.options;
        self.runtime_values.insert(
            id,
            Box::new(move || Some(Value::reflecting(value, &options))),
        );
    }

    /// Evaluate `op(lhs, rhs)`, recording both operands and the result.
    ///
    /// A false result also records how the operands differ, computed on
    /// finalize.
    pub fn compare<L, R>(
        &mut self,
        op: impl FnOnce(&L, &R) -> bool,
        op_id: ExpressionId,
        lhs: L,
        lhs_id: ExpressionId,
        rhs: R,
        rhs_id: ExpressionId,
    ) -> bool
    where
        L: Reflect + 'a,
        R: Reflect + 'a,
    {
        let lhs = Rc::new(lhs);
        let rhs = Rc::new(rhs);
        self.capture_shared(Rc::clone(&lhs), lhs_id);
        self.capture_shared(Rc::clone(&rhs), rhs_id);

        let result = op(&*lhs, &*rhs);
        self.capture_value(result, op_id.clone());

        if !result {
            self.differences.insert(
                op_id,
                Box::new(move || Difference::between(&*lhs, &*rhs)),
            );
        }
        result
    }

    fn capture_shared<T: Reflect + 'a>(&mut self, value: Rc<T>, id: ExpressionId) {
        let options = self.options;
        self.runtime_values.insert(
            id,
            Box::new(move || Some(Value::reflecting(&*value, &options))),
        );
    }

    /// Downcast `value` to `T`, recording the value and, on failure, its
    /// actual type under `type_id`.
    pub fn cast_as<T: Any>(
        &mut self,
        value: &'a dyn AnyReflect,
        value_id: ExpressionId,
        type_id: ExpressionId,
    ) -> Option<&'a T> {
        self.capture_dyn(value.reflect_ref(), value_id);
        let cast = value.any_ref().downcast_ref::<T>();
        if cast.is_none() {
            self.capture_actual_type(value, type_id);
        }
        cast
    }

    /// Whether `value` is a `T`, recording the value and, when it is not,
    /// its actual type under `type_id`.
    pub fn is_instance<T: Any>(
        &mut self,
        value: &'a dyn AnyReflect,
        value_id: ExpressionId,
        type_id: ExpressionId,
    ) -> bool {
        self.capture_dyn(value.reflect_ref(), value_id);
        let is_instance = value.any_ref().is::<T>();
        if !is_instance {
            self.capture_actual_type(value, type_id);
        }
        is_instance
    }

    fn capture_actual_type(&mut self, value: &dyn AnyReflect, type_id: ExpressionId) {
        let actual = value.type_info();
        self.runtime_values
            .insert(type_id, Box::new(move || Some(Value::for_type(actual))));
    }

    /// Whether finalizing a passing expectation would capture values.
    pub fn captures_passing_values(&self) -> bool {
        self.capture_passing
    }

    /// Build the expression tree for this expectation.
    ///
    /// Runtime values and differences are attached when the expectation
    /// failed or passing values are reported; otherwise the tree carries
    /// source text only. Captures whose ID has no source fragment are
    /// dropped without being evaluated.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn finalize(self, successfully: bool) -> Expression {
        let ExpectationContext {
            source_code,
            runtime_values,
            differences,
            capture_passing,
            ..
        } = self;

        let mut graph = KeyedGraph::new();
        for (id, expression) in source_code.resolve() {
            graph.insert_value(expression, id.segments());
        }

        if !successfully || capture_passing {
            trace!(
                values = runtime_values.len(),
                differences = differences.len(),
                "describing captured values"
            );
            for (id, value) in runtime_values {
                if let Some(expression) = graph.get_mut(id.segments()) {
                    if let Some(value) = value() {
                        expression.capture_runtime_value(value);
                    }
                }
            }
            for (id, difference) in differences {
                if let Some(expression) = graph.get_mut(id.segments()) {
                    if let Some(difference) = difference() {
                        expression.difference_description = Some(difference.to_string());
                    }
                }
            }
        }

        squash(graph)
    }
}

#[cfg(test)]
mod tests;
