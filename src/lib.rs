pub mod types;
pub mod node;
pub mod engine;
pub mod bst;
pub mod splay;

// Re-exports for convenience
pub use types::{
    Direction, Link, NodeId, Result, Search, SplayOptions, Successor, Traversal, TreeError,
    TreeSummary,
};
pub use node::{BstNode, NodeRef, SplayNode, TreeNode};
pub use engine::{BinaryTree, Core};
pub use bst::Bst;
pub use splay::SplayTree;
