//! Tree nodes and the arena that owns them.
//!
//! Every node lives in an [`Arena`] slot and is addressed by a [`NodeId`].
//! Child links are the only ownership edges of the tree; the splay variant's
//! parent link is a plain handle back into the same arena, so the
//! parent/child graph never forms an ownership cycle.

use std::ops::{Index, IndexMut};

use crate::types::NodeId;

// ── node contract ────────────────────────────────────────────────────────

/// Read-only view of a tree node: one value plus child (and optionally
/// parent) links.
pub trait TreeNode {
    type Value: Ord;

    /// Whether [`TreeNode::parent`] is maintained for this node type.
    const TRACKS_PARENT: bool = false;

    fn value(&self) -> &Self::Value;
    fn left(&self) -> Option<NodeId>;
    fn right(&self) -> Option<NodeId>;

    fn parent(&self) -> Option<NodeId> {
        None
    }
}

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for super::BstNode<T> {}
    impl<T> Sealed for super::SplayNode<T> {}
}

/// Link and payload mutation, reserved to the tree engine.  Sealed: only
/// [`BstNode`] and [`SplayNode`] implement it.
///
/// `replace_value` exists only for two-child deletion, which moves the
/// successor's value into the deleted node's slot.  Callers outside the
/// engine must not assume a node keeps its value across a delete.
#[doc(hidden)]
pub trait NodeMut: TreeNode + Sized + sealed::Sealed {
    fn new(value: Self::Value) -> Self;
    fn set_left(&mut self, link: Option<NodeId>);
    fn set_right(&mut self, link: Option<NodeId>);

    /// No-op for node types that don't track their parent.
    fn set_parent(&mut self, _link: Option<NodeId>) {}

    fn replace_value(&mut self, value: Self::Value) -> Self::Value;
    fn into_value(self) -> Self::Value;
}

// ── plain BST node ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct BstNode<T> {
    value: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<T: Ord> TreeNode for BstNode<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }

    fn left(&self) -> Option<NodeId> {
        self.left
    }

    fn right(&self) -> Option<NodeId> {
        self.right
    }
}

impl<T: Ord> NodeMut for BstNode<T> {
    fn new(value: T) -> Self {
        BstNode {
            value,
            left: None,
            right: None,
        }
    }

    fn set_left(&mut self, link: Option<NodeId>) {
        self.left = link;
    }

    fn set_right(&mut self, link: Option<NodeId>) {
        self.right = link;
    }

    fn replace_value(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    fn into_value(self) -> T {
        self.value
    }
}

// ── splay node ───────────────────────────────────────────────────────────

/// Node with a non-owning back-reference to its parent.
#[derive(Debug)]
pub struct SplayNode<T> {
    value: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl<T: Ord> TreeNode for SplayNode<T> {
    type Value = T;

    const TRACKS_PARENT: bool = true;

    fn value(&self) -> &T {
        &self.value
    }

    fn left(&self) -> Option<NodeId> {
        self.left
    }

    fn right(&self) -> Option<NodeId> {
        self.right
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

impl<T: Ord> NodeMut for SplayNode<T> {
    fn new(value: T) -> Self {
        SplayNode {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }

    fn set_left(&mut self, link: Option<NodeId>) {
        self.left = link;
    }

    fn set_right(&mut self, link: Option<NodeId>) {
        self.right = link;
    }

    fn set_parent(&mut self, link: Option<NodeId>) {
        self.parent = link;
    }

    fn replace_value(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    fn into_value(self) -> T {
        self.value
    }
}

// ── arena ────────────────────────────────────────────────────────────────

/// Slot storage for nodes.  Freed slots are recycled by later allocations;
/// the handle of a live node never changes.
#[derive(Debug)]
pub struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<NodeId>,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: N) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                let id = self.slots.len();
                self.slots.push(Some(node));
                id
            }
        }
    }

    /// Take a node out of the arena.  Panics on a stale handle.
    pub fn remove(&mut self, id: NodeId) -> N {
        match self.slots.get_mut(id).and_then(Option::take) {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => panic!("stale node handle {}", id),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {}", id),
        }
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        match self.slots.get_mut(id).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("stale node handle {}", id),
        }
    }
}

// ── read-only handle ─────────────────────────────────────────────────────

/// Borrowed view of a node, for inspecting tree shape from outside.
pub struct NodeRef<'a, N> {
    arena: &'a Arena<N>,
    id: NodeId,
}

impl<'a, N> Clone for NodeRef<'a, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, N> Copy for NodeRef<'a, N> {}

impl<'a, N: TreeNode> NodeRef<'a, N> {
    pub(crate) fn new(arena: &'a Arena<N>, id: NodeId) -> Self {
        NodeRef { arena, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a N::Value {
        let arena: &'a Arena<N> = self.arena;
        arena[self.id].value()
    }

    pub fn left(&self) -> Option<NodeRef<'a, N>> {
        self.arena[self.id].left().map(|id| NodeRef::new(self.arena, id))
    }

    pub fn right(&self) -> Option<NodeRef<'a, N>> {
        self.arena[self.id].right().map(|id| NodeRef::new(self.arena, id))
    }

    /// Always `None` for node types that don't track parents.
    pub fn parent(&self) -> Option<NodeRef<'a, N>> {
        self.arena[self.id].parent().map(|id| NodeRef::new(self.arena, id))
    }
}
