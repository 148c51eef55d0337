//! Limits for value snapshots.

/// Bounds on how much of a value [`Value::reflecting`](crate::Value::reflecting)
/// describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReflectOptions {
    /// Deepest child level that is still described. The subject itself is
    /// level zero.
    pub max_child_depth: usize,
    /// Most children kept for a collection, set or dictionary.
    pub max_collection_count: usize,
}

impl Default for ReflectOptions {
    fn default() -> Self {
        ReflectOptions {
            max_child_depth: 10,
            max_collection_count: 10,
        }
    }
}

impl ReflectOptions {
    /// No depth or size limits. Cycles are still cut.
    pub fn unlimited() -> Self {
        ReflectOptions {
            max_child_depth: usize::MAX,
            max_collection_count: usize::MAX,
        }
    }
}
