//! An ordered set of unique keys kept in an AVL tree.
//!
//! Every node owns its two optional subtrees and caches its height. After
//! each `insert` or `remove` the heights of the two subtrees of every node
//! differ by at most one, so lookups, insertions and removals take
//! `O(log n)` steps regardless of insertion order.
//!
//! ```
//! use avl_bst::{AvlTree, TreeError};
//!
//! let mut tree: AvlTree<i32> = (1..=7).collect();
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.find_max(), Ok(&7));
//!
//! tree.clear();
//! assert_eq!(tree.find_min(), Err(TreeError::EmptyContainer));
//! ```

mod error;
mod render;
mod traverse;
mod tree;

pub use error::{Result, TreeError};
pub use render::{Diagram, DiagramStyle, Glyphs};
pub use traverse::{Side, Traverse, Visit};
pub use tree::AvlTree;
