//! Tree rendering for module graphs
//!
//! This module walks a module graph from a starting module and renders the
//! result as an indented box-drawing tree.

pub mod render;

pub use render::{
    connector, Connector, Entries, Stop, TreeEntry, TreeNode, TreeWalker, INDIRECT_MARKER,
};
