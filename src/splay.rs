//! Bottom-up splay tree (Sleator & Tarjan, "Self-Adjusting Binary Search
//! Trees", JACM 32(3), 1985).
//!
//! Every search and delete moves the accessed node to the root through
//! zig / zig-zig / zig-zag rotations; insert does too unless disabled in
//! [`SplayOptions`].  Amortized O(log n) per operation, though a single
//! operation can still cost O(n).
//!
//! Nodes carry a parent handle so the splay can climb from the accessed
//! node.  Every link change below updates the parent handles in the same
//! step.

use std::fmt;

use log::trace;

use crate::engine::{BinaryTree, Core};
use crate::node::{NodeMut, SplayNode, TreeNode};
use crate::types::{Direction, NodeId, SplayOptions};

#[derive(Debug)]
pub struct SplayTree<T> {
    core: Core<SplayNode<T>>,
    options: SplayOptions,
}

impl<T: Ord> SplayTree<T> {
    pub fn new() -> Self {
        Self::with_options(SplayOptions::default())
    }

    pub fn with_options(options: SplayOptions) -> Self {
        SplayTree {
            core: Core::new(),
            options,
        }
    }

    pub fn options(&self) -> &SplayOptions {
        &self.options
    }

    /// Find `value`, splaying it (or the last node visited) to the root.
    pub fn search(&mut self, value: &T) -> bool {
        let s = self.core.search(value);
        let target = if s.found {
            self.core.child(s.parent, s.link)
        } else {
            s.parent
        };
        if let Some(x) = target {
            self.splay(x);
        }
        s.found
    }

    /// Insert `value` unless present, splaying per [`SplayOptions`].
    /// Returns whether a node was created.
    pub fn insert(&mut self, value: T) -> bool {
        let splay = self.options.splay_on_insert;
        self.insert_with(value, splay)
    }

    /// Insert with an explicit choice of whether to splay the new (or the
    /// already present) node.
    pub fn insert_with(&mut self, value: T, splay: bool) -> bool {
        let s = self.core.search(&value);
        let (node, created) = if s.found {
            (self.core.child(s.parent, s.link), false)
        } else {
            (Some(self.core.attach(s.parent, s.link, value)), true)
        };
        if splay {
            if let Some(x) = node {
                self.splay(x);
            }
        }
        created
    }

    /// Remove `value`, returning it.
    ///
    /// Afterwards the splay target is the node that took the successor's
    /// value (two children), the removed node's former parent (zero or one
    /// child), or the last node visited (absent value).
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let s = self.core.search(value);
        if !s.found {
            if let Some(x) = s.parent {
                self.splay(x);
            }
            return None;
        }
        let node = self.core.child(s.parent, s.link)?;
        let two_children = self.core.left(node).is_some() && self.core.right(node).is_some();
        let removed = self.core.delete_node(node, s.parent, s.link);
        let target = if two_children { Some(node) } else { s.parent };
        if let Some(x) = target {
            self.splay(x);
        }
        Some(removed)
    }

    /// Smallest value, splayed to the root.
    pub fn min(&mut self) -> Option<&T> {
        let x = self.core.min_node()?;
        self.splay(x);
        Some(self.core.value(x))
    }

    /// Largest value, splayed to the root.
    pub fn max(&mut self) -> Option<&T> {
        let x = self.core.max_node()?;
        self.splay(x);
        Some(self.core.value(x))
    }

    // ── splay ────────────────────────────────────────────────────────────

    /// Promote `x` until it is the root.
    fn splay(&mut self, x: NodeId) {
        while let Some(p) = self.core.parent(x) {
            match self.core.parent(p) {
                None => self.zig(x, p),
                Some(gp) => {
                    let x_left = self.core.left(p) == Some(x);
                    let p_left = self.core.left(gp) == Some(p);
                    if x_left == p_left {
                        self.zig_zig(x, p, gp, x_left);
                    } else {
                        self.zig_zag(x, p, gp, x_left);
                    }
                }
            }
        }
    }

    /// `p` is the root.
    fn zig(&mut self, x: NodeId, p: NodeId) {
        trace!("zig: {} over root {}", x, p);
        let dir = if self.core.left(p) == Some(x) {
            Direction::Right
        } else {
            Direction::Left
        };
        self.rotate(x, p, dir);
    }

    /// `x` and `p` are children on the same side: rotate `p` over `gp`
    /// first, then `x` over `p`.
    fn zig_zig(&mut self, x: NodeId, p: NodeId, gp: NodeId, left: bool) {
        trace!("zig-zig: {} / {} / {} ({})", x, p, gp, if left { "left" } else { "right" });
        let dir = if left { Direction::Right } else { Direction::Left };
        self.rotate(p, gp, dir);
        self.rotate(x, p, dir);
    }

    /// `x` and `p` are children on opposite sides: rotate `x` over `p`,
    /// then `x` over `gp` the other way.
    fn zig_zag(&mut self, x: NodeId, p: NodeId, gp: NodeId, x_left: bool) {
        trace!("zig-zag: {} / {} / {}", x, p, gp);
        let dir = if x_left { Direction::Right } else { Direction::Left };
        self.rotate(x, p, dir);
        self.rotate(x, gp, dir.opposite());
    }

    /// Rotate `x` above its parent `y`; `y` ends up as `x`'s child on `dir`.
    ///
    /// ```text
    ///        y      Right       x
    ///       / \    ------>     / \
    ///      x   C              A   y
    ///     / \      <------       / \
    ///    A   B      Left        B   C
    /// ```
    ///
    /// The B subtree moves from `x` to `y`; `y`'s old parent (or the root)
    /// now points at `x`.
    fn rotate(&mut self, x: NodeId, y: NodeId, dir: Direction) {
        let arena = &mut self.core.arena;
        assert_eq!(arena[x].parent(), Some(y), "rotate: node {} is not a child of {}", x, y);
        let g = arena[y].parent();
        let b = match dir {
            Direction::Right => {
                assert_eq!(arena[y].left(), Some(x), "right rotation of non-left child {}", x);
                let b = arena[x].right();
                arena[y].set_left(b);
                arena[x].set_right(Some(y));
                b
            }
            Direction::Left => {
                assert_eq!(arena[y].right(), Some(x), "left rotation of non-right child {}", x);
                let b = arena[x].left();
                arena[y].set_right(b);
                arena[x].set_left(Some(y));
                b
            }
        };
        if let Some(b) = b {
            arena[b].set_parent(Some(y));
        }
        match g {
            None => self.core.root = Some(x),
            Some(g) if arena[g].left() == Some(y) => arena[g].set_left(Some(x)),
            Some(g) => arena[g].set_right(Some(x)),
        }
        arena[x].set_parent(g);
        arena[y].set_parent(Some(x));
        trace!("rotate {:?}: {} above {}", dir, x, y);
    }
}

impl<T: Ord> BinaryTree for SplayTree<T> {
    type Value = T;
    type Node = SplayNode<T>;

    fn core(&self) -> &Core<SplayNode<T>> {
        &self.core
    }
}

impl<T: Ord> Default for SplayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for SplayTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Ord> FromIterator<T> for SplayTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = SplayTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + fmt::Display> fmt::Display for SplayTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.fmt_pre_order(f)
    }
}
