//! Attest IR - identifiers and containers for captured expressions.
//!
//! This crate contains the data structures the expectation engine shares
//! across the boundary between generated call-site code and the runtime:
//! - `ExpressionId` for a sub-expression's position in its syntax tree
//! - `KeyedGraph` for reassembling fragments captured at sparse paths
//! - `SourceLocation` for pointing a failure back at the user's code
//!
//! # Design Philosophy
//!
//! - **Compact by default**: shallow paths pack into one `u64`, deep ones
//!   fall back to an explicit segment list.
//! - **Deterministic**: graph children iterate in ascending segment order,
//!   which is the left-to-right operand order of the source.

mod expr_id;
mod graph;
mod source_location;

pub use expr_id::{ExpressionId, Segments};
pub use graph::KeyedGraph;
pub use source_location::SourceLocation;
