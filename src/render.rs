//! Sideways tree diagrams.
//!
//! The left subtree of a key is drawn above it and the right subtree below,
//! so reading the keys top to bottom gives them in ascending order.
//!
//! ```text
//! root
//! │   ┌───1
//! └───2
//!     └───3
//! ```

use std::fmt;

use crate::traverse::Side;
use crate::tree::AvlTree;

/// Strings used to draw branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Branch leading to a left child.
    pub left_branch: &'static str,
    /// Branch leading to a right child or to the root.
    pub right_branch: &'static str,
    /// Indent that continues an open branch.
    pub vertical: &'static str,
    /// Indent with nothing left to connect.
    pub blank: &'static str,
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs {
        left_branch: "┌───",
        right_branch: "└───",
        vertical: "│   ",
        blank: "    ",
    };

    pub const ASCII: Glyphs = Glyphs {
        left_branch: "/---",
        right_branch: "\\---",
        vertical: "|   ",
        blank: "    ",
    };
}

/// Settings for drawing a [`Diagram`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramStyle {
    root_label: String,
    empty_label: String,
    placeholder: String,
    glyphs: Glyphs,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            root_label: String::from("root"),
            empty_label: String::from("Empty tree"),
            placeholder: String::from("#"),
            glyphs: Glyphs::UNICODE,
        }
    }
}

impl DiagramStyle {
    /// Default labels drawn with plain ASCII branches.
    pub fn ascii() -> Self {
        Self::default().with_glyphs(Glyphs::ASCII)
    }

    /// Sets the line printed above a non-empty tree.
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Sets the line printed for an empty tree.
    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }

    /// Sets the marker drawn for a missing child whose sibling exists.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }
}

/// A displayable drawing of an [`AvlTree`].
///
/// This `struct` is created by the [`diagram`] and [`diagram_with`]
/// methods on [`AvlTree`].
///
/// [`diagram`]: AvlTree::diagram
/// [`diagram_with`]: AvlTree::diagram_with
pub struct Diagram<'a, K> {
    tree: &'a AvlTree<K>,
    style: DiagramStyle,
}

struct Shape<'a, K> {
    key: &'a K,
    left: Option<usize>,
    right: Option<usize>,
}

impl<'a, K: fmt::Display> Diagram<'a, K> {
    pub(crate) fn new(tree: &'a AvlTree<K>, style: DiagramStyle) -> Self {
        Self { tree, style }
    }

    // Rebuild child links from the pre-order walk. The parent of a visit at
    // depth d is the latest visit seen at depth d - 1.
    fn shapes(&self) -> Vec<Shape<'a, K>> {
        let mut shapes: Vec<Shape<'a, K>> = Vec::with_capacity(self.tree.len());
        let mut path: Vec<usize> = Vec::new();
        for visit in self.tree.traverse() {
            let index = shapes.len();
            path.truncate(visit.depth);
            if let Some(&parent) = path.last() {
                match visit.side {
                    Side::Left => shapes[parent].left = Some(index),
                    Side::Right => shapes[parent].right = Some(index),
                    Side::Root => {}
                }
            }
            path.push(index);
            shapes.push(Shape {
                key: visit.key,
                left: None,
                right: None,
            });
        }
        shapes
    }

    fn draw(
        &self,
        f: &mut fmt::Formatter<'_>,
        shapes: &[Shape<'a, K>],
        index: Option<usize>,
        prefix: &str,
        is_left: bool,
        has_sibling: bool,
    ) -> fmt::Result {
        let glyphs = &self.style.glyphs;
        let branch = if is_left {
            glyphs.left_branch
        } else {
            glyphs.right_branch
        };
        match index {
            Some(index) => {
                let shape = &shapes[index];
                let (above, below) = if is_left {
                    (glyphs.blank, glyphs.vertical)
                } else {
                    (glyphs.vertical, glyphs.blank)
                };
                self.draw(
                    f,
                    shapes,
                    shape.left,
                    &format!("{prefix}{above}"),
                    true,
                    shape.right.is_some(),
                )?;
                writeln!(f, "{prefix}{branch}{}", shape.key)?;
                self.draw(
                    f,
                    shapes,
                    shape.right,
                    &format!("{prefix}{below}"),
                    false,
                    shape.left.is_some(),
                )
            }
            None if has_sibling => writeln!(f, "{prefix}{branch}{}", self.style.placeholder),
            None => Ok(()),
        }
    }
}

impl<K: fmt::Display> fmt::Display for Diagram<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tree.is_empty() {
            return writeln!(f, "{}", self.style.empty_label);
        }
        let shapes = self.shapes();
        writeln!(f, "{}", self.style.root_label)?;
        self.draw(f, &shapes, Some(0), "", false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let tree = AvlTree::<i32>::new();
        assert_eq!(tree.diagram().to_string(), "Empty tree\n");
        let style = DiagramStyle::default().with_empty_label("(none)");
        assert_eq!(tree.diagram_with(style).to_string(), "(none)\n");
    }

    #[test]
    fn test_single_key() {
        let tree: AvlTree<i32> = [7].into_iter().collect();
        assert_eq!(tree.diagram().to_string(), "root\n└───7\n");
    }

    #[test]
    fn test_placeholder_for_missing_sibling() {
        //   2
        //  / \
        // 1   3
        //      \
        //       4
        let tree: AvlTree<i32> = [2, 1, 3, 4].into_iter().collect();
        let expected = concat!(
            "root\n",
            "│   ┌───1\n",
            "└───2\n",
            "    │   ┌───#\n",
            "    └───3\n",
            "        └───4\n",
        );
        assert_eq!(tree.diagram().to_string(), expected);
    }

    #[test]
    fn test_ascii_style() {
        let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
        let style = DiagramStyle::ascii().with_root_label("*");
        let expected = concat!("*\n", "|   /---1\n", "\\---2\n", "    \\---3\n");
        assert_eq!(tree.diagram_with(style).to_string(), expected);
    }

    #[test]
    fn test_keys_read_in_order() {
        let tree: AvlTree<i32> = (0..20).rev().collect();
        let rendered = tree.diagram().to_string();
        let keys: Vec<i32> = rendered
            .lines()
            .skip(1)
            .filter(|line| !line.ends_with('#'))
            .map(|line| {
                line.trim_start_matches(|c: char| !c.is_ascii_digit())
                    .parse()
                    .unwrap()
            })
            .collect();
        assert_eq!(keys, (0..20).collect::<Vec<_>>());
    }
}
