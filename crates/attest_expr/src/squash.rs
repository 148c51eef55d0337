//! Collapsing a capture graph into one expression tree.
//!
//! Generated code records source text per sub-expression at whatever paths
//! it chose to capture. Some levels of the syntax tree are never recorded,
//! so the graph is sparse. Squashing walks it bottom-up:
//! - a node with a payload adopts the fragments found below it
//! - a node without one passes its fragments up to its parent (hoisting)
//!
//! The root payload, or failing that the single remaining fragment, becomes
//! the tree root.

use std::collections::BTreeMap;

use attest_ir::KeyedGraph;
use attest_stack::ensure_sufficient_stack;
use tracing::warn;

use crate::Expression;

/// Source text of the node produced when a graph has no unique root.
pub const UNAVAILABLE_SOURCE: &str = "<expression unavailable>";

/// Collapse `graph` into a single expression.
///
/// A graph without a root payload and without exactly one top-level
/// fragment cannot be collapsed; that yields a generic node reading
/// [`UNAVAILABLE_SOURCE`] and logs a warning, since it means the capture
/// code produced a malformed graph.
#[tracing::instrument(level = "trace", skip_all)]
pub fn squash(graph: KeyedGraph<Expression>) -> Expression {
    let (root, children) = graph.into_parts();
    let mut fragments = squash_children(children);
    if let Some(root) = root {
        return root.adopting(fragments);
    }
    if fragments.len() == 1 {
        if let Some(only) = fragments.pop() {
            return only;
        }
    }
    warn!(
        fragments = fragments.len(),
        "capture graph has no unique root"
    );
    Expression::generic(UNAVAILABLE_SOURCE)
}

fn squash_children(children: BTreeMap<u32, KeyedGraph<Expression>>) -> Vec<Expression> {
    let mut result = Vec::new();
    for child in children.into_values() {
        let (payload, grandchildren) = child.into_parts();
        let orphans = ensure_sufficient_stack(|| squash_children(grandchildren));
        match payload {
            Some(expression) => result.push(expression.adopting(orphans)),
            None => result.extend(orphans),
        }
    }
    result
}
