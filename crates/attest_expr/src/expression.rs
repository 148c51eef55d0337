//! Expression tree nodes.

use attest_reflect::Value;

/// One captured (sub)expression.
///
/// The structural operands of a node are fixed by its [`ExpressionKind`].
/// Squashing may attach further fragments that did not match an operand;
/// those are kept as extra subexpressions after the structural ones.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expression {
    /// Syntactic shape.
    pub kind: ExpressionKind,
    /// Value the expression evaluated to, if it was captured.
    pub runtime_value: Option<Value>,
    /// Difference between compared operands, set when a comparison failed.
    pub difference_description: Option<String>,
    extra_subexpressions: Vec<Expression>,
}

/// Syntactic shape of an [`Expression`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExpressionKind {
    /// Raw source text with no further structure.
    Generic { source_code: String },
    /// A string literal and the string it denotes.
    StringLiteral {
        source_code: String,
        string_value: String,
    },
    /// `lhs <operator> rhs`.
    BinaryOperation {
        lhs: Box<Expression>,
        operator: String,
        rhs: Box<Expression>,
    },
    /// `value.function_name(arguments)`, or a free call without a receiver.
    FunctionCall {
        value: Option<Box<Expression>>,
        function_name: String,
        arguments: Vec<Argument>,
    },
    /// `value.key_path`.
    PropertyAccess {
        value: Box<Expression>,
        key_path: Box<Expression>,
    },
    /// `!expression`, or `!(expression)` when written with parentheses.
    Negation {
        expression: Box<Expression>,
        is_parenthetical: bool,
    },
}

/// A possibly labelled function argument.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Argument {
    pub label: Option<String>,
    pub value: Expression,
}

impl Argument {
    /// An argument without a label.
    pub fn unlabeled(value: Expression) -> Self {
        Argument { label: None, value }
    }

    /// An argument with a label.
    pub fn labeled(label: impl Into<String>, value: Expression) -> Self {
        Argument {
            label: Some(label.into()),
            value,
        }
    }
}

impl Expression {
    fn from_kind(kind: ExpressionKind) -> Self {
        Expression {
            kind,
            runtime_value: None,
            difference_description: None,
            extra_subexpressions: Vec::new(),
        }
    }

    /// A node holding raw source text.
    pub fn generic(source_code: impl Into<String>) -> Self {
        Self::from_kind(ExpressionKind::Generic {
            source_code: source_code.into(),
        })
    }

    /// A string literal.
    pub fn string_literal(source_code: impl Into<String>, string_value: impl Into<String>) -> Self {
        Self::from_kind(ExpressionKind::StringLiteral {
            source_code: source_code.into(),
            string_value: string_value.into(),
        })
    }

    /// A binary operation.
    pub fn binary_operation(lhs: Expression, operator: impl Into<String>, rhs: Expression) -> Self {
        Self::from_kind(ExpressionKind::BinaryOperation {
            lhs: Box::new(lhs),
            operator: operator.into(),
            rhs: Box::new(rhs),
        })
    }

    /// A function or method call.
    pub fn function_call(
        value: Option<Expression>,
        function_name: impl Into<String>,
        arguments: Vec<Argument>,
    ) -> Self {
        Self::from_kind(ExpressionKind::FunctionCall {
            value: value.map(Box::new),
            function_name: function_name.into(),
            arguments,
        })
    }

    /// A property access.
    pub fn property_access(value: Expression, key_path: Expression) -> Self {
        Self::from_kind(ExpressionKind::PropertyAccess {
            value: Box::new(value),
            key_path: Box::new(key_path),
        })
    }

    /// A logical negation.
    pub fn negation(expression: Expression, is_parenthetical: bool) -> Self {
        Self::from_kind(ExpressionKind::Negation {
            expression: Box::new(expression),
            is_parenthetical,
        })
    }

    /// Direct children: structural operands first, then extra fragments.
    pub fn subexpressions(&self) -> Vec<&Expression> {
        let mut result = self.operands();
        result.extend(&self.extra_subexpressions);
        result
    }

    /// Fragments attached by squashing that matched no structural operand.
    #[inline]
    pub fn extra_subexpressions(&self) -> &[Expression] {
        &self.extra_subexpressions
    }

    /// Structural operands, in source order.
    #[inline]
    pub(crate) fn operands(&self) -> Vec<&Expression> {
        self.kind.operands()
    }

    /// Record the value this expression evaluated to.
    ///
    /// A boolean captured for a negation also gives the negated expression
    /// the complement, so `!flag` shows the value of `flag` itself.
    pub fn capture_runtime_value(&mut self, value: Value) {
        if let ExpressionKind::Negation { expression, .. } = &mut self.kind {
            if let Some(negated) = value.as_bool() {
                expression.capture_runtime_value(Value::from_bool(!negated));
            }
        }
        self.runtime_value = Some(value);
    }

    /// Builder form of [`capture_runtime_value`](Self::capture_runtime_value).
    #[must_use]
    pub fn capturing_runtime_value(mut self, value: Value) -> Self {
        self.capture_runtime_value(value);
        self
    }

    /// Give the first value to this expression and the rest to its direct
    /// subexpressions in order. `None` entries leave a node untouched.
    #[must_use]
    pub fn capturing_runtime_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        let mut values = values.into_iter();
        if let Some(Some(first)) = values.next() {
            self.capture_runtime_value(first);
        }
        let mut targets = self.kind.operands_mut();
        targets.extend(self.extra_subexpressions.iter_mut());
        for (target, value) in targets.into_iter().zip(values) {
            if let Some(value) = value {
                target.capture_runtime_value(value);
            }
        }
        self
    }

    /// Attach a difference description.
    #[must_use]
    pub fn with_difference_description(mut self, description: impl Into<String>) -> Self {
        self.difference_description = Some(description.into());
        self
    }

    /// Attach squashed fragments, reconciling them with structural operands.
    ///
    /// A fragment whose source text equals an operand's replaces that
    /// operand, keeping the operand's value when it has none of its own.
    /// Unmatched fragments become extra subexpressions.
    #[must_use]
    pub(crate) fn adopting(mut self, fragments: Vec<Expression>) -> Self {
        let mut unmatched = Vec::new();
        {
            let mut operands = self.kind.operands_mut();
            let mut replaced = vec![false; operands.len()];
            for mut fragment in fragments {
                let source = fragment.source_code();
                let slot = operands
                    .iter()
                    .zip(&replaced)
                    .position(|(operand, done)| !done && operand.source_code() == source);
                match slot {
                    Some(index) => {
                        let operand = &mut operands[index];
                        if fragment.runtime_value.is_none() {
                            fragment.runtime_value = operand.runtime_value.take();
                        }
                        **operand = fragment;
                        replaced[index] = true;
                    }
                    None => unmatched.push(fragment),
                }
            }
        }
        self.extra_subexpressions.extend(unmatched);
        self
    }

    /// Every node carrying a difference description, in pre-order, with the
    /// node's source text.
    pub fn differences(&self) -> Vec<(String, &str)> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(difference) = &node.difference_description {
                found.push((node.source_code(), difference.as_str()));
            }
            let mut children = node.subexpressions();
            children.reverse();
            stack.extend(children);
        }
        found
    }
}

impl ExpressionKind {
    fn operands(&self) -> Vec<&Expression> {
        match self {
            ExpressionKind::Generic { .. } | ExpressionKind::StringLiteral { .. } => Vec::new(),
            ExpressionKind::BinaryOperation { lhs, rhs, .. } => vec![&**lhs, &**rhs],
            ExpressionKind::FunctionCall {
                value, arguments, ..
            } => value
                .iter()
                .map(Box::as_ref)
                .chain(arguments.iter().map(|argument| &argument.value))
                .collect(),
            ExpressionKind::PropertyAccess { value, key_path } => vec![&**value, &**key_path],
            ExpressionKind::Negation { expression, .. } => vec![&**expression],
        }
    }

    fn operands_mut(&mut self) -> Vec<&mut Expression> {
        match self {
            ExpressionKind::Generic { .. } | ExpressionKind::StringLiteral { .. } => Vec::new(),
            ExpressionKind::BinaryOperation { lhs, rhs, .. } => vec![&mut **lhs, &mut **rhs],
            ExpressionKind::FunctionCall {
                value, arguments, ..
            } => value
                .iter_mut()
                .map(Box::as_mut)
                .chain(arguments.iter_mut().map(|argument| &mut argument.value))
                .collect(),
            ExpressionKind::PropertyAccess { value, key_path } => {
                vec![&mut **value, &mut **key_path]
            }
            ExpressionKind::Negation { expression, .. } => vec![&mut **expression],
        }
    }
}
