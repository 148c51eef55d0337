//! Ordered tree keyed by path segments.
//!
//! A `KeyedGraph` maps paths (sequences of `u32` segments) to optional
//! payloads. Each node holds at most one value and an ordered map of
//! children keyed by a single segment. Inserting at a path creates the
//! missing intermediate nodes with no payload.
//!
//! Children iterate in ascending segment order, which for captured
//! expressions is the left-to-right order of operands in the source.

use std::collections::BTreeMap;

/// Ordered tree of optional payloads addressed by `u32` paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedGraph<V> {
    value: Option<V>,
    children: BTreeMap<u32, KeyedGraph<V>>,
}

impl<V> Default for KeyedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyedGraph<V> {
    /// Create an empty graph.
    pub fn new() -> Self {
        KeyedGraph {
            value: None,
            children: BTreeMap::new(),
        }
    }

    /// Create a single-node graph holding `value`.
    pub fn with_value(value: V) -> Self {
        KeyedGraph {
            value: Some(value),
            children: BTreeMap::new(),
        }
    }

    /// The payload stored on this node.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Mutable access to the payload stored on this node.
    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    /// Remove and return the payload stored on this node.
    pub fn take_value(&mut self) -> Option<V> {
        self.value.take()
    }

    /// Immediate children, ascending by segment.
    #[inline]
    pub fn children(&self) -> &BTreeMap<u32, KeyedGraph<V>> {
        &self.children
    }

    /// Split the node into its payload and its children.
    pub fn into_parts(self) -> (Option<V>, BTreeMap<u32, KeyedGraph<V>>) {
        (self.value, self.children)
    }

    /// Store `value` at `path`, creating intermediate nodes as needed.
    ///
    /// Returns the payload previously stored at exactly that path. Later
    /// writes replace earlier ones.
    pub fn insert_value<P>(&mut self, value: V, path: P) -> Option<V>
    where
        P: IntoIterator<Item = u32>,
    {
        let mut node = self;
        for segment in path {
            node = node.children.entry(segment).or_default();
        }
        node.value.replace(value)
    }

    /// The node at `path`, if any node exists there.
    pub fn subgraph<P>(&self, path: P) -> Option<&KeyedGraph<V>>
    where
        P: IntoIterator<Item = u32>,
    {
        let mut node = self;
        for segment in path {
            node = node.children.get(&segment)?;
        }
        Some(node)
    }

    fn subgraph_mut<P>(&mut self, path: P) -> Option<&mut KeyedGraph<V>>
    where
        P: IntoIterator<Item = u32>,
    {
        let mut node = self;
        for segment in path {
            node = node.children.get_mut(&segment)?;
        }
        Some(node)
    }

    /// The payload stored at exactly `path`.
    ///
    /// Returns `None` when nothing was inserted at that path, even if
    /// descendants hold values.
    pub fn get<P>(&self, path: P) -> Option<&V>
    where
        P: IntoIterator<Item = u32>,
    {
        self.subgraph(path)?.value.as_ref()
    }

    /// Mutable access to the payload stored at exactly `path`.
    pub fn get_mut<P>(&mut self, path: P) -> Option<&mut V>
    where
        P: IntoIterator<Item = u32>,
    {
        self.subgraph_mut(path)?.value.as_mut()
    }

    /// Number of payloads stored anywhere in the graph.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += usize::from(node.value.is_some());
            stack.extend(node.children.values());
        }
        count
    }

    /// Check if no payload is stored anywhere in the graph.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every payload in pre-order, children in ascending order.
    ///
    /// Uses an explicit stack so arbitrarily deep paths cannot overflow.
    pub fn for_each(&self, mut f: impl FnMut(&[u32], &V)) {
        let mut stack: Vec<(Vec<u32>, &KeyedGraph<V>)> = vec![(Vec::new(), self)];
        while let Some((path, node)) = stack.pop() {
            if let Some(value) = &node.value {
                f(&path, value);
            }
            for (segment, child) in node.children.iter().rev() {
                let mut child_path = path.clone();
                child_path.push(*segment);
                stack.push((child_path, child));
            }
        }
    }
}

#[cfg(test)]
mod tests;
