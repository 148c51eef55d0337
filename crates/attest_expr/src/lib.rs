//! Attest Expr - the expression tree shown in failure reports.
//!
//! Generated code captures an expectation's condition as fragments: source
//! text per sub-expression, keyed by [`ExpressionId`](attest_ir::ExpressionId),
//! plus runtime values recorded while the condition ran. This crate turns
//! those fragments into one [`Expression`] tree and renders it.
//!
//! - [`squash`] collapses a sparse [`KeyedGraph`](attest_ir::KeyedGraph) of
//!   fragments into a tree, hoisting fragments past empty levels.
//! - [`Expression::expanded_description`] annotates the source text with
//!   the value of every evaluated sub-expression, e.g.
//!   `(a → true) && (b → false)`.

mod expression;
mod render;
mod squash;

pub use expression::{Argument, Expression, ExpressionKind};
pub use render::DescriptionOptions;
pub use squash::{squash, UNAVAILABLE_SOURCE};
