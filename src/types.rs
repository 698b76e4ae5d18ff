use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ============================================================================
// Node handles and link directions
// ============================================================================

/// Stable handle of a node inside a tree's arena.
///
/// A handle stays valid for as long as its node is linked into the tree;
/// rotations move handles around but never invalidate them.  It is the
/// node's slot index, so every slot the arena can hold has its own handle.
pub type NodeId = usize;

/// How a node is reached from its parent.
///
/// `None` marks the root of the tree (or an empty tree in a search result).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    Left,
    Right,
    None,
}

/// Side a rotation pushes the demoted parent towards.
///
/// `Right` rotates a left child up (the parent becomes its right child),
/// `Left` rotates a right child up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// ============================================================================
// Traversal orders
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// left, self, right
    In,
    /// self, left, right
    Pre,
    /// left, right, self
    Post,
    /// breadth first, left to right
    Level,
}

impl Traversal {
    pub const ALL: [Traversal; 4] = [
        Traversal::In,
        Traversal::Pre,
        Traversal::Post,
        Traversal::Level,
    ];
}

impl FromStr for Traversal {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "in-order" | "inorder" => Ok(Traversal::In),
            "pre" | "pre-order" | "preorder" => Ok(Traversal::Pre),
            "post" | "post-order" | "postorder" => Ok(Traversal::Post),
            "level" | "level-order" | "levelorder" | "bfs" => Ok(Traversal::Level),
            _ => Err(TreeError::UnsupportedTraversal(s.to_string())),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Traversal::In => "in",
            Traversal::Pre => "pre",
            Traversal::Post => "post",
            Traversal::Level => "level",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Search and successor results
// ============================================================================

/// Outcome of a root-to-leaf descent for a value.
///
/// When `found`, the matching node is `parent`'s child on `link`, or the
/// root when `link` is [`Link::None`].  When not found, `parent`/`link`
/// name the empty slot where the value would be attached; an empty tree
/// yields `(None, Link::None, false)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Search {
    pub parent: Option<NodeId>,
    pub link: Link,
    pub found: bool,
}

/// Location of an in-order successor: the node, its parent and the link
/// from that parent.  `parent` is `None` (and `link` is [`Link::None`])
/// when the successor is the tree root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Successor {
    pub node: NodeId,
    pub parent: Option<NodeId>,
    pub link: Link,
}

// ============================================================================
// Options
// ============================================================================

/// Options for [`crate::SplayTree`].
#[derive(Clone, Debug)]
pub struct SplayOptions {
    /// Splay the inserted (or already present) node to the root on insert.
    pub splay_on_insert: bool,
}

impl Default for SplayOptions {
    fn default() -> Self {
        Self {
            splay_on_insert: true,
        }
    }
}

// ============================================================================
// Error type
// ============================================================================

pub type Result<T> = std::result::Result<T, TreeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("unsupported traversal order: {0:?}")]
    UnsupportedTraversal(String),

    #[error("tree invariant violated: {0}")]
    InvariantViolation(String),
}

// ============================================================================
// Summary statistics
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub struct TreeSummary<T> {
    pub node_count: usize,
    pub height: usize,
    pub min: Option<T>,
    pub max: Option<T>,
}
