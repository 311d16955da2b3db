//! Read-only structural walk used to draw a tree.

use std::iter::FusedIterator;

use crate::tree::Node;

/// Which side of its parent a visited key hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The key sits at the root and has no parent.
    Root,
    Left,
    Right,
}

/// A single step of a [`Traverse`] walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit<'a, K> {
    pub key: &'a K,
    /// Number of edges between the root and this key.
    pub depth: usize,
    pub side: Side,
}

/// A lazy pre-order walk over the keys of a tree.
///
/// A parent is always yielded before its left subtree, and its left subtree
/// before its right subtree. The depth and side of each step are enough to
/// rebuild the exact shape of the tree.
///
/// This `struct` is created by the [`traverse`] method on [`AvlTree`].
///
/// [`AvlTree`]: crate::AvlTree
/// [`traverse`]: crate::AvlTree::traverse
pub struct Traverse<'a, K> {
    stack: Vec<(&'a Node<K>, usize, Side)>,
}

impl<'a, K> Traverse<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.map(|node| (node, 0, Side::Root)).into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for Traverse<'a, K> {
    type Item = Visit<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth, side) = self.stack.pop()?;
        if let Some(right) = node.right.as_deref() {
            self.stack.push((right, depth + 1, Side::Right));
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push((left, depth + 1, Side::Left));
        }
        Some(Visit {
            key: &node.key,
            depth,
            side,
        })
    }
}

impl<K> FusedIterator for Traverse<'_, K> {}

impl<K> Clone for Traverse<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}
