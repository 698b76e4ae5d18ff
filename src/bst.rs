//! Unbalanced binary search tree.
//!
//! All operations run in time proportional to the tree height, which
//! depends entirely on insertion order.

use std::fmt;

use crate::engine::{BinaryTree, Core};
use crate::node::BstNode;

#[derive(Debug)]
pub struct Bst<T> {
    core: Core<BstNode<T>>,
}

impl<T: Ord> Bst<T> {
    pub fn new() -> Self {
        Bst { core: Core::new() }
    }

    pub fn search(&self, value: &T) -> bool {
        self.core.search(value).found
    }

    /// Insert `value` unless already present.  Returns whether a node was
    /// created.
    pub fn insert(&mut self, value: T) -> bool {
        let s = self.core.search(&value);
        if s.found {
            return false;
        }
        self.core.attach(s.parent, s.link, value);
        true
    }

    /// Remove `value`, returning it; `None` (and no change) if absent.
    ///
    /// Walks the tree twice: once to locate the node, once inside the
    /// deletion to reach the in-order successor of a two-child node.
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let s = self.core.search(value);
        if !s.found {
            return None;
        }
        let node = self.core.child(s.parent, s.link)?;
        Some(self.core.delete_node(node, s.parent, s.link))
    }

    /// Leftmost value.
    pub fn min(&self) -> Option<&T> {
        self.core.min_node().map(|id| self.core.value(id))
    }

    /// Rightmost value.
    pub fn max(&self) -> Option<&T> {
        self.core.max_node().map(|id| self.core.value(id))
    }
}

impl<T: Ord> BinaryTree for Bst<T> {
    type Value = T;
    type Node = BstNode<T>;

    fn core(&self) -> &Core<BstNode<T>> {
        &self.core
    }
}

impl<T: Ord> Default for Bst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for Bst<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Ord> FromIterator<T> for Bst<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Bst::new();
        tree.extend(iter);
        tree
    }
}

/// Pre-order listing, e.g. `[8, 3, 1]`.
impl<T: Ord + fmt::Display> fmt::Display for Bst<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.fmt_pre_order(f)
    }
}
