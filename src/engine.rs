//! Traversal and deletion engine shared by [`crate::Bst`] and
//! [`crate::SplayTree`].
//!
//! [`Core`] holds the arena, the root handle and the node count, and
//! implements everything that does not depend on how a tree rebalances:
//! the four traversal orders, height, iterative-deepening search, the
//! search triple, in-order successor and two-phase deletion.  The
//! [`BinaryTree`] trait exposes the read-only part of it to callers.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use std::fmt;

use log::debug;

use crate::node::{Arena, NodeMut, NodeRef, TreeNode};
use crate::types::{Link, NodeId, Result, Search, Successor, Traversal, TreeError, TreeSummary};

/// Storage and shared algorithms of a binary search tree.
#[derive(Debug)]
pub struct Core<N> {
    pub(crate) arena: Arena<N>,
    pub(crate) root: Option<NodeId>,
    pub(crate) node_count: usize,
}

impl<N> Core<N> {
    pub(crate) fn new() -> Self {
        Core {
            arena: Arena::new(),
            root: None,
            node_count: 0,
        }
    }
}

impl<N: TreeNode> Core<N> {
    #[inline]
    pub(crate) fn value(&self, id: NodeId) -> &N::Value {
        self.arena[id].value()
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].left()
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].right()
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// Node hanging off `parent` on `link`; the root for [`Link::None`].
    pub(crate) fn child(&self, parent: Option<NodeId>, link: Link) -> Option<NodeId> {
        match (parent, link) {
            (Some(p), Link::Left) => self.left(p),
            (Some(p), Link::Right) => self.right(p),
            _ => self.root,
        }
    }

    pub(crate) fn node_ref(&self, id: Option<NodeId>) -> Option<NodeRef<'_, N>> {
        id.map(|id| NodeRef::new(&self.arena, id))
    }

    // ── traversal ────────────────────────────────────────────────────────

    pub(crate) fn traverse<U, F>(&self, order: Traversal, mut f: F) -> Vec<U>
    where
        F: FnMut(&N::Value) -> U,
    {
        let mut out = Vec::with_capacity(self.node_count);
        match order {
            Traversal::In => self.in_order(&mut f, &mut out),
            Traversal::Pre => self.pre_order_iter(&mut f, &mut out),
            Traversal::Post => self.post_order(&mut f, &mut out),
            Traversal::Level => self.level_order(&mut f, &mut out),
        }
        out
    }

    /// Left spine onto the stack, pop, then continue from the right child.
    fn in_order<U, F>(&self, f: &mut F, out: &mut Vec<U>)
    where
        F: FnMut(&N::Value) -> U,
    {
        let mut stack: Vec<NodeId> = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(id) = curr {
                stack.push(id);
                curr = self.left(id);
            }
            let Some(id) = stack.pop() else { break };
            out.push(f(self.value(id)));
            curr = self.right(id);
        }
    }

    pub(crate) fn pre_order_rec<U, F>(&self, node: Option<NodeId>, f: &mut F, out: &mut Vec<U>)
    where
        F: FnMut(&N::Value) -> U,
    {
        if let Some(id) = node {
            out.push(f(self.value(id)));
            self.pre_order_rec(self.left(id), f, out);
            self.pre_order_rec(self.right(id), f, out);
        }
    }

    /// Pre-order with an explicit stack; right is pushed before left so
    /// left pops first.
    pub(crate) fn pre_order_iter<U, F>(&self, f: &mut F, out: &mut Vec<U>)
    where
        F: FnMut(&N::Value) -> U,
    {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(f(self.value(id)));
            if let Some(r) = self.right(id) {
                stack.push(r);
            }
            if let Some(l) = self.left(id) {
                stack.push(l);
            }
        }
    }

    /// Each node is pushed twice: first to expand its children, then (with
    /// the flag set) to be emitted once both subtrees are done.
    fn post_order<U, F>(&self, f: &mut F, out: &mut Vec<U>)
    where
        F: FnMut(&N::Value) -> U,
    {
        let mut stack: Vec<(NodeId, bool)> = self.root.map(|r| (r, false)).into_iter().collect();
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                out.push(f(self.value(id)));
                continue;
            }
            stack.push((id, true));
            if let Some(r) = self.right(id) {
                stack.push((r, false));
            }
            if let Some(l) = self.left(id) {
                stack.push((l, false));
            }
        }
    }

    fn level_order<U, F>(&self, f: &mut F, out: &mut Vec<U>)
    where
        F: FnMut(&N::Value) -> U,
    {
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            out.push(f(self.value(id)));
            if let Some(l) = self.left(id) {
                queue.push_back(l);
            }
            if let Some(r) = self.right(id) {
                queue.push_back(r);
            }
        }
    }

    // ── height ───────────────────────────────────────────────────────────

    pub(crate) fn height_rec(&self, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => 1 + self.height_rec(self.left(id)).max(self.height_rec(self.right(id))),
        }
    }

    /// Depth-first walk over `(node, depth)` pairs keeping the running max.
    pub(crate) fn height_iter(&self) -> usize {
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        let mut height = 0;
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(r) = self.right(id) {
                stack.push((r, depth + 1));
            }
            if let Some(l) = self.left(id) {
                stack.push((l, depth + 1));
            }
        }
        height
    }

    // ── iterative deepening ──────────────────────────────────────────────

    /// Nodes exactly `depth` links below any of `starts`, left to right.
    fn depth_limited(&self, starts: &[NodeId], depth: usize) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = starts.iter().rev().map(|&id| (id, depth)).collect();
        while let Some((id, remaining)) = stack.pop() {
            if remaining == 0 {
                found.push(id);
                continue;
            }
            if let Some(r) = self.right(id) {
                stack.push((r, remaining - 1));
            }
            if let Some(l) = self.left(id) {
                stack.push((l, remaining - 1));
            }
        }
        found
    }

    /// One depth-limited pass per depth `0..=height`.  Each pass resumes
    /// from the nodes the previous pass stopped at and goes one link
    /// deeper, so the total work stays linear in the node count.
    pub(crate) fn iddfs<U, F>(&self, mut f: F) -> Vec<U>
    where
        F: FnMut(&N::Value) -> U,
    {
        let limit = self.height_iter();
        let mut seen = HashSet::with_capacity(self.node_count);
        let mut out = Vec::with_capacity(self.node_count);
        let mut frontier: Vec<NodeId> = self.root.into_iter().collect();
        let mut depth = 0;
        while depth <= limit && !frontier.is_empty() {
            let step = if depth == 0 { 0 } else { 1 };
            let level = self.depth_limited(&frontier, step);
            for &id in &level {
                if seen.insert(id) {
                    out.push(f(self.value(id)));
                }
            }
            frontier = level;
            depth += 1;
        }
        out
    }

    // ── lookup ───────────────────────────────────────────────────────────

    /// Walk down from the root with three-way comparison.
    pub(crate) fn search(&self, value: &N::Value) -> Search {
        let mut parent = None;
        let mut link = Link::None;
        let mut curr = self.root;
        while let Some(id) = curr {
            match value.cmp(self.value(id)) {
                Ordering::Equal => {
                    return Search {
                        parent,
                        link,
                        found: true,
                    }
                }
                Ordering::Less => {
                    parent = Some(id);
                    link = Link::Left;
                    curr = self.left(id);
                }
                Ordering::Greater => {
                    parent = Some(id);
                    link = Link::Right;
                    curr = self.right(id);
                }
            }
        }
        Search {
            parent,
            link,
            found: false,
        }
    }

    /// Leftmost node of the subtree rooted at `start`, which hangs off
    /// `parent` on `link`.
    fn leftmost(&self, start: NodeId, parent: NodeId, link: Link) -> Successor {
        let (mut node, mut parent, mut link) = (start, parent, link);
        while let Some(l) = self.left(node) {
            parent = node;
            node = l;
            link = Link::Left;
        }
        Successor {
            node,
            parent: Some(parent),
            link,
        }
    }

    /// Node holding the next larger value after `value`.
    ///
    /// With a right subtree the successor is its leftmost node.  Without
    /// one it is the deepest ancestor whose left link lies on the path to
    /// `value`.  `None` when `value` is the maximum or is absent.
    pub(crate) fn successor(&self, value: &N::Value) -> Option<Successor> {
        let mut parent = None;
        let mut link = Link::None;
        let mut last_left: Option<Successor> = None;
        let mut curr = self.root?;
        loop {
            match value.cmp(self.value(curr)) {
                Ordering::Equal => break,
                Ordering::Less => {
                    last_left = Some(Successor {
                        node: curr,
                        parent,
                        link,
                    });
                    parent = Some(curr);
                    link = Link::Left;
                    curr = self.left(curr)?;
                }
                Ordering::Greater => {
                    parent = Some(curr);
                    link = Link::Right;
                    curr = self.right(curr)?;
                }
            }
        }
        match self.right(curr) {
            Some(r) => Some(self.leftmost(r, curr, Link::Right)),
            None => last_left,
        }
    }

    pub(crate) fn min_node(&self) -> Option<NodeId> {
        let mut curr = self.root?;
        while let Some(l) = self.left(curr) {
            curr = l;
        }
        Some(curr)
    }

    pub(crate) fn max_node(&self) -> Option<NodeId> {
        let mut curr = self.root?;
        while let Some(r) = self.right(curr) {
            curr = r;
        }
        Some(curr)
    }

    // ── validation ───────────────────────────────────────────────────────

    /// Check ordering, node count and (for parent-tracking nodes) parent
    /// back-references.
    pub(crate) fn validate(&self) -> Result<()> {
        let violation = |msg: String| Err(TreeError::InvariantViolation(msg));

        if let Some(root) = self.root {
            if N::TRACKS_PARENT && self.parent(root).is_some() {
                return violation(format!("root {} has a parent", root));
            }
        }

        let mut reached = 0usize;
        let mut stack: Vec<(NodeId, Option<&N::Value>, Option<&N::Value>)> =
            self.root.map(|r| (r, None, None)).into_iter().collect();
        while let Some((id, lo, hi)) = stack.pop() {
            reached += 1;
            if reached > self.arena.live() {
                return violation("cycle in child links".to_string());
            }
            let v = self.value(id);
            if lo.is_some_and(|lo| v <= lo) || hi.is_some_and(|hi| v >= hi) {
                return violation(format!("node {} breaks the ordering", id));
            }
            for child in [self.left(id), self.right(id)].into_iter().flatten() {
                if N::TRACKS_PARENT && self.parent(child) != Some(id) {
                    return violation(format!(
                        "node {} is a child of {} but points to {:?}",
                        child,
                        id,
                        self.parent(child)
                    ));
                }
            }
            if let Some(l) = self.left(id) {
                stack.push((l, lo, Some(v)));
            }
            if let Some(r) = self.right(id) {
                stack.push((r, Some(v), hi));
            }
        }

        if reached != self.node_count {
            return violation(format!(
                "node count is {} but {} nodes are reachable",
                self.node_count, reached
            ));
        }
        if reached != self.arena.live() {
            return violation(format!(
                "{} nodes reachable but {} allocated",
                reached,
                self.arena.live()
            ));
        }
        Ok(())
    }

    pub(crate) fn fmt_pre_order(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        N::Value: fmt::Display,
    {
        let items = self.traverse(Traversal::Pre, |v| v.to_string());
        write!(f, "[{}]", items.join(", "))
    }
}

impl<N: NodeMut> Core<N> {
    /// Point `parent`'s `link` (or the root) at `child`, keeping the child's
    /// parent back-reference in step.
    pub(crate) fn set_child(&mut self, parent: Option<NodeId>, link: Link, child: Option<NodeId>) {
        let parent = match (parent, link) {
            (Some(p), Link::Left) => {
                self.arena[p].set_left(child);
                Some(p)
            }
            (Some(p), Link::Right) => {
                self.arena[p].set_right(child);
                Some(p)
            }
            _ => {
                self.root = child;
                None
            }
        };
        if let Some(c) = child {
            self.arena[c].set_parent(parent);
        }
    }

    /// Create a node for `value` in the empty slot named by a failed search.
    pub(crate) fn attach(&mut self, parent: Option<NodeId>, link: Link, value: N::Value) -> NodeId {
        let id = self.arena.alloc(N::new(value));
        self.set_child(parent, link, Some(id));
        self.node_count += 1;
        debug!("attached node {} under {:?} ({:?})", id, parent, link);
        id
    }

    /// Two-phase removal of `node`, which hangs off `parent` on `link`.
    ///
    /// A leaf is detached and a single child is spliced into its place.
    /// A node with two children takes over its in-order successor's value,
    /// and the successor (which has no left child) is removed instead.  The
    /// count drops once, when the structural removal happens.  Returns the
    /// value that left the tree.
    pub(crate) fn delete_node(&mut self, node: NodeId, parent: Option<NodeId>, link: Link) -> N::Value {
        match (self.left(node), self.right(node)) {
            (Some(_), Some(r)) => {
                let succ = self.leftmost(r, node, Link::Right);
                debug!("node {} takes the value of successor {}", node, succ.node);
                let value = self.delete_node(succ.node, succ.parent, succ.link);
                self.arena[node].replace_value(value)
            }
            (child, None) | (None, child) => {
                self.set_child(parent, link, child);
                self.node_count -= 1;
                debug!("detached node {} (promoted {:?})", node, child);
                self.arena.remove(node).into_value()
            }
        }
    }
}

// ── public read-only surface ─────────────────────────────────────────────

/// Operations every tree variant shares.  None of them restructure the
/// tree, so they are available through `&self` on a splay tree too.
pub trait BinaryTree {
    type Value: Ord;
    type Node: TreeNode<Value = Self::Value>;

    #[doc(hidden)]
    fn core(&self) -> &Core<Self::Node>;

    /// Number of nodes reachable from the root.
    fn len(&self) -> usize {
        self.core().node_count
    }

    fn is_empty(&self) -> bool {
        self.core().root.is_none()
    }

    fn root(&self) -> Option<&Self::Value> {
        self.core().root.map(|id| self.core().value(id))
    }

    fn root_node(&self) -> Option<NodeRef<'_, Self::Node>> {
        self.core().node_ref(self.core().root)
    }

    fn left_subtree(&self) -> Option<NodeRef<'_, Self::Node>> {
        self.root_node().and_then(|n| n.left())
    }

    fn right_subtree(&self) -> Option<NodeRef<'_, Self::Node>> {
        self.root_node().and_then(|n| n.right())
    }

    /// `f(value)` for every node in the given order.
    fn traversal<U, F>(&self, order: Traversal, f: F) -> Vec<U>
    where
        F: FnMut(&Self::Value) -> U,
    {
        self.core().traverse(order, f)
    }

    /// Cloned values in the given order.
    fn values(&self, order: Traversal) -> Vec<Self::Value>
    where
        Self::Value: Clone,
    {
        self.traversal(order, |v| v.clone())
    }

    /// Like [`BinaryTree::traversal`], with the order given by name.
    fn traversal_named<U, F>(&self, order: &str, f: F) -> Result<Vec<U>>
    where
        F: FnMut(&Self::Value) -> U,
    {
        let order: Traversal = order.parse()?;
        Ok(self.traversal(order, f))
    }

    /// Pre-order computed recursively; always equal to the stack-based
    /// [`Traversal::Pre`].
    fn pre_order_recursive<U, F>(&self, mut f: F) -> Vec<U>
    where
        F: FnMut(&Self::Value) -> U,
    {
        let mut out = Vec::with_capacity(self.len());
        self.core().pre_order_rec(self.core().root, &mut f, &mut out);
        out
    }

    /// Sorted values (in-order).
    fn sort(&self) -> Vec<Self::Value>
    where
        Self::Value: Clone,
    {
        self.values(Traversal::In)
    }

    /// 0 for an empty tree, 1 for a single node.
    fn height(&self) -> usize {
        self.core().height_iter()
    }

    fn height_recursive(&self) -> usize {
        self.core().height_rec(self.core().root)
    }

    /// Level-by-level values built from repeated depth-limited passes.
    fn iddfs(&self) -> Vec<Self::Value>
    where
        Self::Value: Clone,
    {
        self.core().iddfs(|v| v.clone())
    }

    fn iddfs_with<U, F>(&self, f: F) -> Vec<U>
    where
        F: FnMut(&Self::Value) -> U,
    {
        self.core().iddfs(f)
    }

    /// Smallest value strictly greater than `value`, if `value` is present
    /// and is not the maximum.
    fn in_order_successor(&self, value: &Self::Value) -> Option<&Self::Value> {
        self.core().successor(value).map(|s| self.core().value(s.node))
    }

    /// Search triple `(parent, link, found)` without touching the tree.
    fn locate(&self, value: &Self::Value) -> Search {
        self.core().search(value)
    }

    fn validate(&self) -> Result<()> {
        self.core().validate()
    }

    fn summary(&self) -> TreeSummary<&Self::Value> {
        let core = self.core();
        TreeSummary {
            node_count: core.node_count,
            height: core.height_iter(),
            min: core.min_node().map(|id| core.value(id)),
            max: core.max_node().map(|id| core.value(id)),
        }
    }
}
