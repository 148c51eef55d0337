//! Rendering expressions as text.
//!
//! [`Expression::source_code`] reproduces what the user wrote.
//! [`Expression::expanded_description`] additionally annotates each
//! sub-expression with the value it evaluated to:
//!
//! ```text
//! (a → true) && (b → false)
//! ```
//!
//! # Annotation Rules
//!
//! A captured value is appended as ` → value` unless one of these holds:
//! - the value's description equals the rendered text
//! - the value is a function, which has no useful description
//! - the node is the root and its value is a boolean, which the pass or
//!   fail status already states (unless `include_root_value` is set)
//!
//! Annotated nodes below the root are parenthesized so nesting stays
//! readable.

use attest_reflect::FUNCTION_PLACEHOLDER;
use attest_stack::ensure_sufficient_stack;

use crate::{Argument, Expression, ExpressionKind};

/// Knobs for [`Expression::expanded_description_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DescriptionOptions {
    /// Append `: Type` to leaves that carry a value.
    pub include_type_names: bool,
    /// Parenthesize annotated sub-expressions.
    pub include_parentheses_if_needed: bool,
    /// Annotate the root even when its value is a boolean.
    pub include_root_value: bool,
    /// Use debug descriptions of values instead of test descriptions.
    pub use_debug_descriptions: bool,
}

impl Default for DescriptionOptions {
    fn default() -> Self {
        DescriptionOptions {
            include_type_names: false,
            include_parentheses_if_needed: true,
            include_root_value: false,
            use_debug_descriptions: false,
        }
    }
}

impl DescriptionOptions {
    /// Options for the verbose rendering.
    pub fn debug() -> Self {
        DescriptionOptions {
            include_type_names: true,
            include_parentheses_if_needed: true,
            include_root_value: true,
            use_debug_descriptions: true,
        }
    }
}

impl Expression {
    /// The source text of the expression, without values.
    pub fn source_code(&self) -> String {
        match &self.kind {
            ExpressionKind::Generic { source_code }
            | ExpressionKind::StringLiteral { source_code, .. } => source_code.clone(),
            ExpressionKind::BinaryOperation { lhs, operator, rhs } => {
                format!("{} {operator} {}", lhs.source_code(), rhs.source_code())
            }
            ExpressionKind::FunctionCall {
                value,
                function_name,
                arguments,
            } => {
                let arguments = join_arguments(arguments, Expression::source_code);
                match value {
                    Some(value) => format!("{}.{function_name}({arguments})", value.source_code()),
                    None => format!("{function_name}({arguments})"),
                }
            }
            ExpressionKind::PropertyAccess { value, key_path } => {
                format!("{}.{}", value.source_code(), key_path.source_code())
            }
            ExpressionKind::Negation {
                expression,
                is_parenthetical,
            } => {
                if *is_parenthetical {
                    format!("!({})", expression.source_code())
                } else {
                    format!("!{}", expression.source_code())
                }
            }
        }
    }

    /// The source text annotated with captured values.
    pub fn expanded_description(&self) -> String {
        self.expanded_description_with(DescriptionOptions::default())
    }

    /// Verbose rendering: type names, debug descriptions and the root value.
    pub fn expanded_debug_description(&self) -> String {
        self.expanded_description_with(DescriptionOptions::debug())
    }

    /// Render with explicit options.
    pub fn expanded_description_with(&self, options: DescriptionOptions) -> String {
        Renderer { options }.render(self, 0, true)
    }
}

fn join_arguments(arguments: &[Argument], render: impl Fn(&Expression) -> String) -> String {
    arguments
        .iter()
        .map(|argument| match &argument.label {
            Some(label) => format!("{label}: {}", render(&argument.value)),
            None => render(&argument.value),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

struct Renderer {
    options: DescriptionOptions,
}

impl Renderer {
    fn render(&self, node: &Expression, depth: usize, may_wrap: bool) -> String {
        let text = ensure_sufficient_stack(|| self.render_body(node, depth));
        let Some(value) = self.annotation(node, depth, &text) else {
            return text;
        };
        let annotated = format!("{text} → {value}");
        if may_wrap && depth > 0 && self.options.include_parentheses_if_needed {
            format!("({annotated})")
        } else {
            annotated
        }
    }

    fn render_body(&self, node: &Expression, depth: usize) -> String {
        let child = |expression: &Expression| self.render(expression, depth + 1, true);
        match &node.kind {
            ExpressionKind::Generic { source_code } => {
                let text = self.splice(source_code, node.extra_subexpressions(), depth);
                self.with_type_name(node, text)
            }
            ExpressionKind::StringLiteral { source_code, .. } => {
                self.with_type_name(node, source_code.clone())
            }
            ExpressionKind::BinaryOperation { lhs, operator, rhs } => {
                format!("{} {operator} {}", child(lhs), child(rhs))
            }
            ExpressionKind::FunctionCall {
                value,
                function_name,
                arguments,
            } => {
                let arguments = join_arguments(arguments, child);
                match value {
                    Some(value) => format!("{}.{function_name}({arguments})", child(value)),
                    None => format!("{function_name}({arguments})"),
                }
            }
            ExpressionKind::PropertyAccess { value, key_path } => {
                format!("{}.{}", child(value), child(key_path))
            }
            ExpressionKind::Negation {
                expression,
                is_parenthetical,
            } => {
                if *is_parenthetical {
                    format!("!({})", self.render(expression, depth + 1, false))
                } else {
                    format!("!{}", child(expression))
                }
            }
        }
    }

    /// Replace each fragment's source text inside `source` with the
    /// fragment's rendering. Fragments are matched left to right at token
    /// boundaries; a fragment that cannot be found is left out.
    fn splice(&self, source: &str, fragments: &[Expression], depth: usize) -> String {
        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for fragment in fragments {
            let needle = fragment.source_code();
            let Some(start) = find_token(source, &needle, cursor) else {
                continue;
            };
            out.push_str(&source[cursor..start]);
            out.push_str(&self.render(fragment, depth + 1, true));
            cursor = start + needle.len();
        }
        out.push_str(&source[cursor..]);
        out
    }

    fn with_type_name(&self, node: &Expression, text: String) -> String {
        match &node.runtime_value {
            Some(value) if self.options.include_type_names => format!("{text}: {}", value.type_info),
            _ => text,
        }
    }

    fn annotation(&self, node: &Expression, depth: usize, rendered: &str) -> Option<String> {
        let value = node.runtime_value.as_ref()?;
        if depth == 0 && !self.options.include_root_value && value.type_info.is_bool() {
            return None;
        }
        let description = if self.options.use_debug_descriptions {
            &value.debug_description
        } else {
            &value.description
        };
        if description == rendered || description == FUNCTION_PLACEHOLDER {
            return None;
        }
        Some(description.clone())
    }
}

/// Find `needle` in `haystack` at or after `from`, not inside a longer
/// identifier.
fn find_token(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let mut offset = from;
    while let Some(found) = haystack.get(offset..)?.find(needle) {
        let start = offset + found;
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        let starts_word = needle.chars().next().is_some_and(is_ident_char);
        let ends_word = needle.chars().next_back().is_some_and(is_ident_char);
        let clean_start = !starts_word || !before.is_some_and(is_ident_char);
        let clean_end = !ends_word || !after.is_some_and(is_ident_char);
        if clean_start && clean_end {
            return Some(start);
        }
        offset = start + needle.chars().next().map_or(1, char::len_utf8);
    }
    None
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
