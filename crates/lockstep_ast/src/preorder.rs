//! Deterministic pre-order traversal.
//!
//! [`PreOrder`] visits each node before its children, children in declared
//! order. The iterator carries the parent relation itself (via an explicit
//! stack) because parents are a property of a traversal position, not of
//! the node.

use crate::{NodeId, Tree};

/// Iterator over `(node, parent)` pairs in pre-order.
///
/// Given the same tree, the emission order is always identical. The
/// iterator is not restartable; construct a new one to traverse again.
pub struct PreOrder<'t> {
    tree: &'t Tree,
    stack: Vec<(NodeId, Option<NodeId>)>,
}

impl<'t> PreOrder<'t> {
    /// Creates a traversal starting at the tree root.
    ///
    /// An unbuilt (rootless) tree yields nothing.
    pub fn new(tree: &'t Tree) -> Self {
        let stack = match tree.root() {
            Some(root) => vec![(root, None)],
            None => Vec::new(),
        };
        Self { tree, stack }
    }
}

impl Iterator for PreOrder<'_> {
    type Item = (NodeId, Option<NodeId>);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, parent) = self.stack.pop()?;
        let node = self.tree.node(id);
        // Reverse push so the first child is visited first.
        for &child in node.children.iter().rev() {
            self.stack.push((child, Some(id)));
        }
        Some((id, parent))
    }
}
