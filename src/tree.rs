use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Result, TreeError};
use crate::render::{Diagram, DiagramStyle};
use crate::traverse::Traverse;

/// Largest height difference tolerated between the two subtrees of a node.
const ALLOWED_IMBALANCE: i32 = 1;

/// An ordered set of unique keys stored in an AVL tree.
///
/// ```
/// use avl_bst::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
/// assert!(tree.contains(&1));
/// assert_eq!(tree.find_min(), Ok(&1));
/// tree.remove(&1);
/// assert!(!tree.contains(&1));
/// ```
pub struct AvlTree<K> {
    root: Link<K>,
    num_nodes: usize,
}

pub(crate) type Link<K> = Option<Box<Node<K>>>;

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    height: i32,
}

enum Direction {
    FromParent,
    FromLeft,
}

impl<K> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Clears the tree, deallocating all nodes.
    ///
    /// Nodes are released in post-order without recursion,
    /// so a node is only dropped once both of its children are gone.
    pub fn clear(&mut self) {
        let mut released = 0usize;
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(top) = stack.last_mut() {
            let child = match top.left.take() {
                Some(left) => Some(left),
                None => top.right.take(),
            };
            match child {
                Some(child) => stack.push(child),
                None => {
                    stack.pop();
                    released += 1;
                }
            }
        }
        self.num_nodes = 0;
        if released > 0 {
            debug!(released, "cleared tree");
        }
    }

    /// Moves all keys out into a new tree, leaving this one empty.
    pub fn take(&mut self) -> Self {
        debug!(len = self.num_nodes, "transferring tree ownership");
        mem::take(self)
    }

    /// Returns a lazy pre-order walk over the tree for drawing it.
    ///
    /// Each step yields the key together with its depth and the side of
    /// its parent it hangs off. The walk can be restarted by calling
    /// `traverse` again or by cloning the iterator.
    pub fn traverse(&self) -> Traverse<'_, K> {
        Traverse::new(self.root.as_deref())
    }

    /// Returns a displayable diagram of the tree using the default style.
    ///
    /// ```
    /// use avl_bst::AvlTree;
    /// let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(
    ///     tree.diagram().to_string(),
    ///     "root\n│   ┌───1\n└───2\n    └───3\n"
    /// );
    /// ```
    pub fn diagram(&self) -> Diagram<'_, K>
    where
        K: fmt::Display,
    {
        Diagram::new(self, DiagramStyle::default())
    }

    /// Returns a displayable diagram of the tree drawn with `style`.
    pub fn diagram_with(&self, style: DiagramStyle) -> Diagram<'_, K>
    where
        K: fmt::Display,
    {
        Diagram::new(self, style)
    }

    fn traverse_nodes<'a, Pre, In>(&'a self, mut preorder: Pre, mut inorder: In)
    where
        Pre: FnMut(&'a Node<K>),
        In: FnMut(&'a Node<K>),
    {
        let mut stack: Vec<(&'a Node<K>, Direction)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, Direction::FromParent));
        }
        while let Some((node, dir)) = stack.pop() {
            match dir {
                Direction::FromParent => {
                    preorder(node);
                    stack.push((node, Direction::FromLeft));
                    if let Some(left) = node.left.as_deref() {
                        stack.push((left, Direction::FromParent));
                    }
                }
                Direction::FromLeft => {
                    inorder(node);
                    if let Some(right) = node.right.as_deref() {
                        stack.push((right, Direction::FromParent));
                    }
                }
            }
        }
    }

    fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.num_nodes);
        self.traverse_nodes(|_| {}, |node| keys.push(&node.key));
        keys
    }
}

impl<K: Ord> AvlTree<K> {
    /// Returns true if the tree contains the given key.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the key in the tree that is equal to the given key.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| &node.key)
    }

    /// Returns the smallest key, or `EmptyContainer` if the tree is empty.
    pub fn find_min(&self) -> Result<&K> {
        let mut node = self.root.as_deref().ok_or(TreeError::EmptyContainer)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.key)
    }

    /// Returns the largest key, or `EmptyContainer` if the tree is empty.
    pub fn find_max(&self) -> Result<&K> {
        let mut node = self.root.as_deref().ok_or(TreeError::EmptyContainer)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.key)
    }

    /// Inserts a key into the tree.
    /// Returns whether the key was newly inserted; an existing equal key is left untouched.
    pub fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = Node::insert(self.root.take(), key);
        self.root = Some(root);
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = Node::remove(self.root.take(), key);
        self.root = root;
        if removed {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let mut num_nodes = 0;
        self.traverse_nodes(
            |node| {
                let mut left_height = -1;
                let mut right_height = -1;

                // Check left child
                if let Some(left) = node.left.as_deref() {
                    assert!(left.key < node.key);
                    left_height = left.height;
                }

                // Check right child
                if let Some(right) = node.right.as_deref() {
                    assert!(right.key > node.key);
                    right_height = right.height;
                }

                // Check height
                assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

                // Check AVL condition (nearly balance)
                assert!(left_height <= right_height + ALLOWED_IMBALANCE);
                assert!(right_height <= left_height + ALLOWED_IMBALANCE);

                num_nodes += 1;
            },
            |_| {},
        );

        // Check ordering across whole subtrees, not just direct children
        let keys = self.keys();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));

        // Check number of nodes
        assert_eq!(num_nodes, self.num_nodes);
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => break,
            }
        }
        current
    }
}

/// Height of a subtree; an absent subtree has height -1.
fn height<K>(link: &Link<K>) -> i32 {
    match link {
        None => -1,
        Some(node) => node.height,
    }
}

impl<K> Node<K> {
    fn create(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 0,
        })
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    // Promote the left child. Heights of the demoted node are settled first.
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        let Some(mut left) = node.left.take() else {
            return node;
        };
        node.left = left.right.take();
        node.adjust_height();
        left.right = Some(node);
        left.adjust_height();
        trace!(height = left.height, "rotated right");
        left
    }

    // Promote the right child.
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        let Some(mut right) = node.right.take() else {
            return node;
        };
        node.right = right.left.take();
        node.adjust_height();
        right.left = Some(node);
        right.adjust_height();
        trace!(height = right.height, "rotated left");
        right
    }

    fn rotate_left_right(mut node: Box<Self>) -> Box<Self> {
        node.left = node.left.take().map(Self::rotate_left);
        Self::rotate_right(node)
    }

    fn rotate_right_left(mut node: Box<Self>) -> Box<Self> {
        node.right = node.right.take().map(Self::rotate_right);
        Self::rotate_left(node)
    }

    /// Restores the AVL condition at `node` and refreshes its height.
    /// Both subtrees must already be balanced and differ in height by at most 2.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        let left_height = height(&node.left);
        let right_height = height(&node.right);
        if left_height - right_height > ALLOWED_IMBALANCE {
            // Equal heights below the left child take the single rotation
            let single = match node.left.as_deref() {
                Some(left) => height(&left.left) >= height(&left.right),
                None => true,
            };
            node = if single {
                Self::rotate_right(node)
            } else {
                Self::rotate_left_right(node)
            };
        } else if right_height - left_height > ALLOWED_IMBALANCE {
            let single = match node.right.as_deref() {
                Some(right) => height(&right.right) >= height(&right.left),
                None => true,
            };
            node = if single {
                Self::rotate_left(node)
            } else {
                Self::rotate_right_left(node)
            };
        }
        node.adjust_height();
        node
    }

    /// Detaches the node holding the smallest key of the subtree.
    /// Returns that node, stripped of children, and the rebalanced remainder.
    fn detach_min(mut node: Box<Self>) -> (Box<Self>, Link<K>) {
        match node.left.take() {
            None => {
                let rest = node.right.take();
                node.height = 0;
                trace!("detached minimum");
                (node, rest)
            }
            Some(left) => {
                let (min, rest) = Self::detach_min(left);
                node.left = rest;
                (min, Some(Self::rebalance(node)))
            }
        }
    }
}

impl<K: Ord> Node<K> {
    fn insert(link: Link<K>, key: K) -> (Box<Self>, bool) {
        let mut node = match link {
            None => return (Self::create(key), true),
            Some(node) => node,
        };
        let inserted = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, inserted) = Self::insert(node.left.take(), key);
                node.left = Some(left);
                inserted
            }
            Ordering::Greater => {
                let (right, inserted) = Self::insert(node.right.take(), key);
                node.right = Some(right);
                inserted
            }
            Ordering::Equal => false,
        };
        (Self::rebalance(node), inserted)
    }

    fn remove<Q>(link: Link<K>, key: &Q) -> (Link<K>, bool)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match link {
            None => return (None, false),
            Some(node) => node,
        };
        match key.cmp(node.key.borrow()) {
            Ordering::Less => {
                let (left, removed) = Self::remove(node.left.take(), key);
                node.left = left;
                (Some(Self::rebalance(node)), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove(node.right.take(), key);
                node.right = right;
                (Some(Self::rebalance(node)), removed)
            }
            Ordering::Equal => (Self::unlink(node).map(Self::rebalance), true),
        }
    }

    // Replace a found node by its only child, or by the minimum of its
    // right subtree when it has two children. The node itself is dropped.
    fn unlink(mut node: Box<Self>) -> Link<K> {
        match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                // When the successor is the right child itself, `rest` is its
                // own right subtree, so the removed node never reappears.
                let (mut successor, rest) = Self::detach_min(right);
                successor.left = Some(left);
                successor.right = rest;
                Some(successor)
            }
        }
    }
}

impl<K: Clone> Node<K> {
    fn deep_clone(&self) -> Box<Self> {
        Box::new(Node {
            key: self.key.clone(),
            left: self.left.as_deref().map(Self::deep_clone),
            right: self.right.as_deref().map(Self::deep_clone),
            height: self.height,
        })
    }
}

impl<K> Drop for AvlTree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Clone for AvlTree<K> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.as_deref().map(Node::deep_clone),
            num_nodes: self.num_nodes,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.root = source.root.as_deref().map(Node::deep_clone);
        self.num_nodes = source.num_nodes;
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl<K: PartialEq> PartialEq for AvlTree<K> {
    fn eq(&self, other: &Self) -> bool {
        self.num_nodes == other.num_nodes && self.keys() == other.keys()
    }
}

impl<K: Eq> Eq for AvlTree<K> {}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
impl<K> AvlTree<K> {
    /// Keys in ascending order.
    pub(crate) fn in_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys().into_iter().cloned().collect()
    }

    /// Pre-order (key, height) pairs, capturing the exact shape.
    pub(crate) fn shape(&self) -> Vec<(K, i32)>
    where
        K: Clone,
    {
        let mut shape = Vec::with_capacity(self.num_nodes);
        self.traverse_nodes(|node| shape.push((node.key.clone(), node.height)), |_| {});
        shape
    }
}
